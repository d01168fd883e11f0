//! Property-based tests for the linking pipeline.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated Kiroku paths, layouts and live states.

use proptest::prelude::*;

use kiroku_nav::core::screens::{navigators, screens};
use kiroku_nav::core::state::{Route, RouteState};
use kiroku_nav::core::topology::Topology;
use kiroku_nav::core::types::{Layout, LinkType, Params};
use kiroku_nav::linking::{
    parse_path, path_from_state, LinkOutcome, Linker, MockNavigation, NavigationAction,
    StateAdapter,
};

/// Paths without placeholders.
const STATIC_PATHS: &[&str] = &[
    "/",
    "/home",
    "/statistics",
    "/home/overview",
    "/statistics/overview",
    "/settings",
    "/settings/account",
    "/settings/preferences",
    "/settings/preferences/language",
    "/settings/about",
    "/settings/timezone",
    "/social",
    "/social/friend-list",
    "/social/friend-requests",
    "/achievements",
    "/main-menu",
    "/main-menu/preferences",
    "/search",
    "/tz-fix/introduction",
    "/tz-fix/selection",
    "/log-in",
    "/force-update",
];

/// Strategy for a single parameter value.
fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,10}"
}

/// Strategy for paths that resolve to a named screen (never `NotFound`).
fn kiroku_path() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(STATIC_PATHS).prop_map(String::from),
        segment().prop_map(|date| format!("/day/{date}")),
        segment().prop_map(|id| format!("/drinking-session/{id}")),
        (segment(), prop::sample::select(vec!["live", "edit", "summary"]))
            .prop_map(|(id, view)| format!("/drinking-session/{id}/{view}")),
        segment().prop_map(|user| format!("/profile/{user}")),
        segment().prop_map(|user| format!("/profile/{user}/friends")),
        segment().prop_map(|period| format!("/statistics/period/{period}")),
    ]
}

fn layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::Narrow), Just(Layout::Wide)]
}

fn tabs(tab: &'static str) -> Route {
    let mut routes = vec![Route::screen(screens::HOME, Params::new())];
    if tab != screens::HOME {
        routes.push(Route::screen(tab, Params::new()));
    }
    Route::navigator(navigators::BOTTOM_TAB, RouteState::new(routes))
}

fn screen(name: &'static str) -> Route {
    Route::screen(name, Params::new())
}

fn nested(navigator: &'static str, child: Route) -> Route {
    Route::navigator(navigator, RouteState::new(vec![child]))
}

/// Live root states a link can be followed from.
fn live_states() -> Vec<RouteState> {
    vec![
        RouteState::new(vec![tabs(screens::HOME)]),
        RouteState::new(vec![tabs(screens::HOME), screen(screens::HOME_OVERVIEW)]),
        RouteState::new(vec![
            tabs(screens::STATISTICS_TAB),
            screen(screens::STATISTICS_OVERVIEW),
        ]),
        RouteState::new(vec![
            tabs(screens::HOME),
            screen(screens::HOME_OVERVIEW),
            nested(
                navigators::RIGHT_MODAL,
                nested(
                    screens::right_modal::SETTINGS,
                    screen(screens::settings::ROOT),
                ),
            ),
        ]),
        RouteState::new(vec![
            tabs(screens::HOME),
            nested(
                navigators::LEFT_MODAL,
                nested(screens::left_modal::SEARCH, screen(screens::search::ROOT)),
            ),
        ]),
        RouteState::new(vec![
            tabs(screens::HOME),
            nested(navigators::TZ_FIX_MODAL, screen(screens::tz_fix::INTRODUCTION)),
        ]),
        RouteState::new(vec![screen(screens::LOG_IN)]),
    ]
}

fn live_state() -> impl Strategy<Value = RouteState> {
    prop::sample::select(live_states())
}

fn linker() -> Linker {
    Linker::kiroku().unwrap()
}

proptest! {
    /// Serializing an adapted state and parsing the path again leads to the
    /// same adapted state.
    #[test]
    fn adapted_state_round_trips_through_path(path in kiroku_path(), layout in layout()) {
        let linker = linker();
        let registry = linker.registry();
        let adapter = StateAdapter::new(registry, linker.topology(), layout);

        let adapted = adapter.adapt(&parse_path(&path, registry).unwrap()).unwrap();
        let href = path_from_state(&adapted.state, registry).unwrap();
        let again = adapter.adapt(&parse_path(&href, registry).unwrap()).unwrap();

        prop_assert_eq!(adapted.state, again.state, "path {} serialized as {}", path, href);
    }

    /// The focused bottom tab always belongs to the central pane.
    #[test]
    fn bottom_tab_matches_central_pane(path in kiroku_path(), layout in layout()) {
        let linker = linker();
        let topology = Topology::kiroku();
        let (_, adapted) = linker.resolve(&path, layout).unwrap();

        if let Some(central) = adapted.central_pane(&topology) {
            let tab = adapted
                .bottom_tab(&topology)
                .and_then(|tabs| tabs.state())
                .and_then(RouteState::top)
                .map(|tab| tab.name().to_string());
            let expected = topology
                .tab_for_central(central.name().as_str())
                .map(String::from);
            prop_assert_eq!(tab, expected, "path {}", path);
        }
    }

    /// An overlay push is always the last action of a plan.
    #[test]
    fn companions_are_pushed_before_overlay(
        path in kiroku_path(),
        layout in layout(),
        live in live_state(),
    ) {
        let linker = linker();
        let topology = Topology::kiroku();
        let current = MockNavigation::new(live).current();
        let planned = linker.plan(&current, &path, LinkType::Navigate, layout).unwrap();

        if let Some(plan) = planned.plan {
            let overlay_push = plan.actions.iter().position(|action| {
                matches!(action, NavigationAction::Push { payload, .. }
                    if topology.is_overlay(payload.name().as_str()))
            });
            if let Some(position) = overlay_push {
                prop_assert_eq!(position, plan.len() - 1, "path {}:\n{}", path, plan.preview());
            }
        }
    }

    /// Following a link lands on its screen, and following it again
    /// dispatches nothing.
    #[test]
    fn following_a_link_twice_is_idempotent(
        path in kiroku_path(),
        layout in layout(),
        live in live_state(),
    ) {
        let linker = linker();
        let nav = MockNavigation::new(live);
        let (_, adapted) = linker.resolve(&path, layout).unwrap();
        let wanted = adapted.state.find_focused_leaf().cloned().unwrap();

        linker.link_to(&nav, &path, LinkType::Navigate, layout);
        let landed = nav.current().find_focused_leaf().cloned().unwrap();
        prop_assert!(
            landed.same_place(&wanted),
            "path {} landed on {:?}, wanted {:?}",
            path,
            landed,
            wanted
        );
        let dispatched = nav.dispatched().len();
        let second = linker.link_to(&nav, &path, LinkType::Navigate, layout);

        prop_assert_eq!(second, LinkOutcome::Unchanged, "path {}", path);
        prop_assert_eq!(nav.dispatched().len(), dispatched);
    }
}

#[test]
fn root_path_is_only_the_default_tab() {
    let linker = linker();
    let state = parse_path("/", linker.registry()).unwrap();

    assert_eq!(state.len(), 1);
    let tabs = &state.routes()[0];
    assert!(tabs.is(navigators::BOTTOM_TAB));
    assert_eq!(tabs.state().unwrap().len(), 1);
    assert!(tabs.focused_leaf().is(screens::HOME));
}
