//! linking::plan
//!
//! Minimal-action planning.
//!
//! # Architecture
//!
//! Planning runs in two pure steps:
//!
//! 1. [`Planner::classify`] compares the live root state with the target and
//!    names the kind of transition ([`Transition`]).
//! 2. [`Transition::into_plan`] turns that classification into an ordered
//!    [`ActionPlan`].
//!
//! # Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. Target focused screen and params equal the live ones: nothing to do.
//! 2. Target is a central pane that differs from the topmost one: push the
//!    matching tab if it changed, then push (or, for `Up`, replace) the pane.
//! 3. `Up`: pop the overlay when what lies beneath it is the target,
//!    otherwise replace the top route.
//! 4. Target is an overlay that is not on top: pop a side modal on top,
//!    push mandatory companions, push the overlay.
//! 5. Target is the bottom tab: push the tab if it changed, then pop to the
//!    tab (narrow) or push its default central pane (wide).
//! 6. Target overlay is already on top: navigate inside it from the deepest
//!    navigator both trees share.
//! 7. Anything else is pushed on the root stack.
//!
//! When no rule can produce actions (empty live state, no bottom tab to
//! switch) the transition is [`Transition::Unresolved`] and the caller
//! resets the navigator.

use crate::core::registry::RouteRegistry;
use crate::core::state::{Route, RouteState};
use crate::core::topology::{RootKind, Topology};
use crate::core::types::{Layout, LinkType, NavigatorKey, Params};

use super::action::{ActionPlan, NavigationAction};
use super::adapt::AdaptedState;
use super::diff::{topmost_bottom_tab, topmost_central_pane, PartialStateDiff};
use super::parse::parse_path;

/// What happens after a bottom tab switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabFollowUp {
    /// Narrow layout: drop everything above the bottom tab.
    PopToTop,
    /// Wide layout: show the tab's central pane.
    PushCentral(Route),
    Nothing,
}

/// Classification of a live → target transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The target is already focused.
    Unchanged,

    /// `Up` with only the bottom tab left on the root stack.
    NothingToDismiss,

    /// A different central pane.
    CentralPane {
        tab: Option<(Route, Option<NavigatorKey>)>,
        central: Route,
        replace: bool,
        root: Option<NavigatorKey>,
    },

    /// `Up` to the screen underneath the top overlay.
    DismissOverlay { root: Option<NavigatorKey> },

    /// `Up` to anything else.
    ReplaceTop {
        route: Route,
        root: Option<NavigatorKey>,
    },

    /// An overlay that is not on top yet.
    OpenOverlay {
        dismiss: bool,
        companions: Vec<NavigationAction>,
        overlay: Route,
        root: Option<NavigatorKey>,
    },

    /// The bottom tab navigator itself.
    BottomTab {
        tab: Option<(Route, Option<NavigatorKey>)>,
        follow_up: TabFollowUp,
        root: Option<NavigatorKey>,
    },

    /// A different screen inside the overlay already on top.
    WithinOverlay {
        route: Route,
        target: Option<NavigatorKey>,
        push: bool,
    },

    /// Push on the root stack.
    Push {
        route: Route,
        root: Option<NavigatorKey>,
    },

    /// No action sequence reaches the target.
    Unresolved,
}

impl Transition {
    /// Actions realizing this transition, in dispatch order.
    ///
    /// Returns `None` for [`Transition::Unresolved`].
    pub fn into_plan(self, path: &str) -> Option<ActionPlan> {
        let mut plan = ActionPlan::new(path);

        match self {
            Transition::Unchanged | Transition::NothingToDismiss => {}
            Transition::CentralPane {
                tab,
                central,
                replace,
                root,
            } => {
                if let Some((tab, tabs_key)) = tab {
                    plan.add(NavigationAction::push(tab, tabs_key));
                }
                plan.add(if replace {
                    NavigationAction::replace(central, root)
                } else {
                    NavigationAction::push(central, root)
                });
            }
            Transition::DismissOverlay { root } => plan.add(NavigationAction::pop(root)),
            Transition::ReplaceTop { route, root } => {
                plan.add(NavigationAction::replace(route, root))
            }
            Transition::OpenOverlay {
                dismiss,
                companions,
                overlay,
                root,
            } => {
                if dismiss {
                    plan.add(NavigationAction::pop(root.clone()));
                }
                for action in companions {
                    plan.add(action);
                }
                plan.add(NavigationAction::push(overlay, root));
            }
            Transition::BottomTab {
                tab,
                follow_up,
                root,
            } => {
                if let Some((tab, tabs_key)) = tab {
                    plan.add(NavigationAction::push(tab, tabs_key));
                }
                match follow_up {
                    TabFollowUp::PopToTop => plan.add(NavigationAction::pop_to_top(root)),
                    TabFollowUp::PushCentral(central) => {
                        plan.add(NavigationAction::push(central, root))
                    }
                    TabFollowUp::Nothing => {}
                }
            }
            Transition::WithinOverlay {
                route,
                target,
                push,
            } => plan.add(if push {
                NavigationAction::push(route, target)
            } else {
                NavigationAction::navigate(route, target)
            }),
            Transition::Push { route, root } => plan.add(NavigationAction::push(route, root)),
            Transition::Unresolved => return None,
        }

        Some(plan)
    }
}

/// Classifies transitions between a live root state and a target.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    registry: &'a RouteRegistry,
    topology: &'a Topology,
    layout: Layout,
}

impl<'a> Planner<'a> {
    pub fn new(registry: &'a RouteRegistry, topology: &'a Topology, layout: Layout) -> Self {
        Self {
            registry,
            topology,
            layout,
        }
    }

    /// Classify the move from `current` to `target`.
    ///
    /// `raw` is the parsed (unadapted) tree of the same path; its focused
    /// root route says what the link actually points at.
    pub fn classify(
        &self,
        current: &RouteState,
        raw: &RouteState,
        target: &AdaptedState,
        link_type: LinkType,
    ) -> Transition {
        let t = self.topology;
        let (Some(target_root), Some(top)) = (raw.focused_route(), current.top()) else {
            return Transition::Unresolved;
        };
        let root = current.key().cloned();
        let target_leaf = target.state.find_focused_leaf();

        if let (Some(live), Some(wanted)) = (current.find_focused_leaf(), target_leaf) {
            if live.same_place(wanted) {
                return Transition::Unchanged;
            }
        }

        let kind = t.kind(target_root.name().as_str());

        if kind == RootKind::CentralPane {
            let differs = topmost_central_pane(current, t)
                .map_or(true, |central| !central.same_place(target_root));
            if differs {
                let tab = match (
                    topmost_bottom_tab(current, t),
                    t.tab_for_central(target_root.name().as_str()),
                ) {
                    (Some((live_tab, tabs_key)), Some(wanted)) if live_tab.name() != wanted => {
                        Some((Route::screen(wanted, Params::new()), tabs_key.cloned()))
                    }
                    _ => None,
                };
                return Transition::CentralPane {
                    tab,
                    central: target_root.clone(),
                    replace: link_type == LinkType::Up,
                    root,
                };
            }
        }

        if link_type == LinkType::Up {
            if current.len() < 2 {
                return Transition::NothingToDismiss;
            }
            if t.is_side_modal(top.name().as_str()) {
                let beneath = self.beneath_overlay(current);
                if let (Some(beneath), Some(wanted)) = (beneath, target_leaf) {
                    if beneath.same_place(wanted) {
                        return Transition::DismissOverlay { root };
                    }
                }
            }
            return Transition::ReplaceTop {
                route: target_root.clone(),
                root,
            };
        }

        let on_top = top.name() == target_root.name();

        if t.is_overlay(target_root.name().as_str()) && !on_top {
            let dismiss = t.is_side_modal(top.name().as_str());
            let base = if dismiss {
                current.popped()
            } else {
                current.clone()
            };
            let companions = PartialStateDiff::between(&base, target, t).actions(&base, t);
            return Transition::OpenOverlay {
                dismiss,
                companions,
                overlay: target_root.clone(),
                root,
            };
        }

        if kind == RootKind::BottomTab {
            return self.switch_tab(current, target_root, target, root);
        }

        if t.is_overlay(target_root.name().as_str()) {
            let (route, target_key) = minimal_route(current, target_root);
            return Transition::WithinOverlay {
                route,
                target: target_key,
                push: link_type == LinkType::Push,
            };
        }

        Transition::Push {
            route: target_root.clone(),
            root,
        }
    }

    fn switch_tab(
        &self,
        current: &RouteState,
        target_root: &Route,
        target: &AdaptedState,
        root: Option<NavigatorKey>,
    ) -> Transition {
        let t = self.topology;
        let Some((live_tab, tabs_key)) = topmost_bottom_tab(current, t) else {
            return Transition::Unresolved;
        };

        let tab = target_root
            .state()
            .and_then(RouteState::top)
            .filter(|wanted| !wanted.same_place(live_tab))
            .map(|wanted| (wanted.clone(), tabs_key.cloned()));

        let follow_up = if self.layout.is_narrow() {
            if current.len() > 1 {
                TabFollowUp::PopToTop
            } else {
                TabFollowUp::Nothing
            }
        } else {
            // The central pane must end up on top, even when the same pane
            // already sits under an overlay.
            match target.central_pane(t) {
                Some(central) if current.top().map_or(true, |top| !top.same_place(central)) => {
                    TabFollowUp::PushCentral(central.clone())
                }
                Some(_) => TabFollowUp::Nothing,
                None if current.len() > 1 => TabFollowUp::PopToTop,
                None => TabFollowUp::Nothing,
            }
        };

        Transition::BottomTab {
            tab,
            follow_up,
            root,
        }
    }

    /// Focused screen under the top overlay: the `backTo` of the overlay's
    /// focused screen if it parses, else the focus of the route below it.
    fn beneath_overlay(&self, current: &RouteState) -> Option<Route> {
        let top = current.top()?;
        if let Some(back_to) = top.focused_leaf().params().get("backTo") {
            if let Ok(state) = parse_path(back_to, self.registry) {
                if let Some(leaf) = state.find_focused_leaf() {
                    return Some(leaf.clone());
                }
            }
        }
        let below = current.routes().len().checked_sub(2)?;
        current
            .routes()
            .get(below)
            .map(|route| route.focused_leaf().clone())
    }
}

/// Walk down the focused routes both trees share and return the first
/// target route that differs, with the key of the navigator hosting it.
fn minimal_route(current: &RouteState, target_root: &Route) -> (Route, Option<NavigatorKey>) {
    let mut state = current;
    let mut payload = target_root;
    let mut key = current.key();

    while let Some(focused) = state.focused_route() {
        if focused.name() != payload.name() {
            break;
        }
        match (
            focused.state(),
            payload.state().and_then(RouteState::focused_route),
        ) {
            (Some(inner), Some(next)) => {
                state = inner;
                key = inner.key();
                payload = next;
            }
            _ => break,
        }
    }

    (payload.clone(), key.cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::kiroku;
    use crate::core::screens::{navigators, screens};
    use crate::linking::adapt::StateAdapter;

    fn key(s: &str) -> NavigatorKey {
        NavigatorKey::new(s).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tabs(tab: &'static str) -> Route {
        Route::navigator(
            navigators::BOTTOM_TAB,
            RouteState::new(vec![Route::screen(tab, Params::new())]).keyed(key("tabs")),
        )
    }

    fn settings(leaf: &'static str, leaf_params: Params) -> Route {
        Route::navigator(
            navigators::RIGHT_MODAL,
            RouteState::new(vec![Route::navigator(
                screens::right_modal::SETTINGS,
                RouteState::new(vec![Route::screen(leaf, leaf_params)]).keyed(key("settings")),
            )])
            .keyed(key("rhp")),
        )
    }

    fn live(routes: Vec<Route>) -> RouteState {
        RouteState::new(routes).keyed(key("root"))
    }

    struct Fixture {
        registry: RouteRegistry,
        topology: Topology,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: kiroku::registry().unwrap(),
                topology: Topology::kiroku(),
            }
        }

        fn classify(
            &self,
            current: &RouteState,
            path: &str,
            link_type: LinkType,
            layout: Layout,
        ) -> Transition {
            let raw = parse_path(path, &self.registry).unwrap();
            let target = StateAdapter::new(&self.registry, &self.topology, layout)
                .adapt(&raw)
                .unwrap();
            Planner::new(&self.registry, &self.topology, layout).classify(
                current, &raw, &target, link_type,
            )
        }

        fn plan(&self, current: &RouteState, path: &str, link_type: LinkType, layout: Layout) -> ActionPlan {
            self.classify(current, path, link_type, layout)
                .into_plan(path)
                .unwrap()
        }
    }

    mod unchanged {
        use super::*;

        #[test]
        fn same_focused_screen_is_a_no_op() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), settings(screens::settings::ROOT, Params::new())]);
            assert_eq!(
                f.classify(&current, "/settings", LinkType::Navigate, Layout::Narrow),
                Transition::Unchanged
            );
        }

        #[test]
        fn different_params_are_not_a_no_op() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::STATISTICS_TAB),
                Route::screen(screens::STATISTICS_PERIOD, params(&[("period", "week")])),
            ]);
            let plan = f.plan(&current, "/statistics/period/month", LinkType::Navigate, Layout::Narrow);
            assert_eq!(plan.len(), 1);
            assert_eq!(plan.actions[0].kind(), "PUSH");
        }
    }

    mod central_pane {
        use super::*;

        #[test]
        fn tab_synced_before_central() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME)]);
            let plan = f.plan(&current, "/statistics/overview", LinkType::Navigate, Layout::Wide);

            assert_eq!(plan.len(), 2);
            assert_eq!(plan.actions[0].target(), Some(&key("tabs")));
            assert!(plan.actions[0].payload().unwrap().is(screens::STATISTICS_TAB));
            assert_eq!(plan.actions[1].target(), Some(&key("root")));
            assert!(plan.actions[1].payload().unwrap().is(screens::STATISTICS_OVERVIEW));
        }

        #[test]
        fn matching_tab_not_pushed() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME)]);
            let plan = f.plan(&current, "/home/overview", LinkType::Navigate, Layout::Narrow);
            assert_eq!(plan.len(), 1);
        }

        #[test]
        fn up_replaces_central() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                Route::screen(screens::HOME_OVERVIEW, Params::new()),
            ]);
            let plan = f.plan(&current, "/statistics/overview", LinkType::Up, Layout::Narrow);
            assert_eq!(plan.actions.last().unwrap().kind(), "REPLACE");
        }
    }

    mod up {
        use super::*;

        #[test]
        fn pops_when_back_to_matches() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                settings(screens::settings::ACCOUNT, params(&[("backTo", "/settings")])),
            ]);
            let plan = f.plan(&current, "/settings", LinkType::Up, Layout::Narrow);
            assert_eq!(plan.actions, vec![NavigationAction::pop(Some(key("root")))]);
        }

        #[test]
        fn pops_when_central_below_matches() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                Route::screen(screens::HOME_OVERVIEW, Params::new()),
                settings(screens::settings::ACCOUNT, Params::new()),
            ]);
            let plan = f.plan(&current, "/home/overview", LinkType::Up, Layout::Wide);
            assert_eq!(plan.actions, vec![NavigationAction::pop(Some(key("root")))]);
        }

        #[test]
        fn replaces_otherwise() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                settings(screens::settings::ACCOUNT, Params::new()),
            ]);
            let plan = f.plan(&current, "/settings", LinkType::Up, Layout::Narrow);
            assert_eq!(plan.len(), 1);
            assert_eq!(plan.actions[0].kind(), "REPLACE");
            assert!(plan.actions[0].payload().unwrap().is(navigators::RIGHT_MODAL));
        }

        #[test]
        fn nothing_to_dismiss_on_bare_tab() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME)]);
            let transition = f.classify(&current, "/settings", LinkType::Up, Layout::Narrow);
            assert_eq!(transition, Transition::NothingToDismiss);
            assert!(transition.into_plan("/settings").unwrap().is_empty());
        }
    }

    mod overlays {
        use super::*;

        #[test]
        fn companions_before_modal() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME)]);
            let plan = f.plan(&current, "/settings", LinkType::Navigate, Layout::Narrow);

            let kinds: Vec<&str> = plan.actions.iter().map(|a| a.kind()).collect();
            assert_eq!(kinds, vec!["PUSH", "PUSH"]);
            assert!(plan.actions[0].payload().unwrap().is(screens::HOME_OVERVIEW));
            assert!(plan.actions[1].payload().unwrap().is(navigators::RIGHT_MODAL));
        }

        #[test]
        fn other_side_modal_dismissed_first() {
            let f = Fixture::new();
            let search = Route::navigator(navigators::LEFT_MODAL, RouteState::new(vec![]));
            let current = live(vec![tabs(screens::HOME), search]);
            let plan = f.plan(&current, "/day/2024-05-01", LinkType::Navigate, Layout::Narrow);

            let kinds: Vec<&str> = plan.actions.iter().map(|a| a.kind()).collect();
            assert_eq!(kinds, vec!["POP", "PUSH"]);
        }

        #[test]
        fn navigates_inside_modal_on_top() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), settings(screens::settings::ROOT, Params::new())]);
            let plan = f.plan(&current, "/settings/account", LinkType::Navigate, Layout::Narrow);

            assert_eq!(plan.len(), 1);
            assert_eq!(plan.actions[0].kind(), "NAVIGATE");
            assert_eq!(plan.actions[0].target(), Some(&key("settings")));
            assert!(plan.actions[0].payload().unwrap().is(screens::settings::ACCOUNT));
        }

        #[test]
        fn push_link_type_forces_push_inside_modal() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), settings(screens::settings::ROOT, Params::new())]);
            let plan = f.plan(&current, "/settings/about", LinkType::Push, Layout::Narrow);
            assert_eq!(plan.actions[0].kind(), "PUSH");
        }

        #[test]
        fn other_flow_targets_modal_navigator() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), settings(screens::settings::ROOT, Params::new())]);
            let plan = f.plan(&current, "/achievements", LinkType::Navigate, Layout::Narrow);
            assert_eq!(plan.actions[0].target(), Some(&key("rhp")));
            assert!(plan.actions[0].payload().unwrap().is(screens::right_modal::ACHIEVEMENTS));
        }
    }

    mod bottom_tab {
        use super::*;

        #[test]
        fn narrow_pops_to_tab() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), Route::screen(screens::HOME_OVERVIEW, Params::new())]);
            let plan = f.plan(&current, "/statistics", LinkType::Navigate, Layout::Narrow);

            let kinds: Vec<&str> = plan.actions.iter().map(|a| a.kind()).collect();
            assert_eq!(kinds, vec!["PUSH", "POP_TO_TOP"]);
            assert_eq!(plan.actions[1].target(), Some(&key("root")));
        }

        #[test]
        fn wide_pushes_default_central() {
            let f = Fixture::new();
            let current = live(vec![tabs(screens::HOME), Route::screen(screens::HOME_OVERVIEW, Params::new())]);
            let plan = f.plan(&current, "/statistics", LinkType::Navigate, Layout::Wide);

            assert_eq!(plan.len(), 2);
            assert!(plan.actions[0].payload().unwrap().is(screens::STATISTICS_TAB));
            assert!(plan.actions[1].payload().unwrap().is(screens::STATISTICS_OVERVIEW));
        }

        #[test]
        fn wide_brings_central_above_open_modal() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                Route::screen(screens::HOME_OVERVIEW, Params::new()),
                settings(screens::settings::ROOT, Params::new()),
            ]);
            let plan = f.plan(&current, "/home", LinkType::Navigate, Layout::Wide);

            assert_eq!(plan.len(), 1);
            assert_eq!(plan.actions[0].kind(), "PUSH");
            assert!(plan.actions[0].payload().unwrap().is(screens::HOME_OVERVIEW));
            assert_eq!(plan.actions[0].target(), Some(&key("root")));
        }

        #[test]
        fn wide_with_central_on_top_is_a_no_op() {
            let f = Fixture::new();
            let current = live(vec![
                tabs(screens::HOME),
                Route::screen(screens::HOME_OVERVIEW, Params::new()),
            ]);
            let plan = f.plan(&current, "/home", LinkType::Navigate, Layout::Wide);
            assert!(plan.is_empty());
        }

        #[test]
        fn unresolved_without_live_tab() {
            let f = Fixture::new();
            let current = live(vec![Route::screen(screens::LOG_IN, Params::new())]);
            let transition = f.classify(&current, "/statistics", LinkType::Navigate, Layout::Narrow);
            assert_eq!(transition, Transition::Unresolved);
            assert!(transition.into_plan("/statistics").is_none());
        }
    }

    #[test]
    fn fallback_pushes_on_root() {
        let f = Fixture::new();
        let current = live(vec![tabs(screens::HOME)]);
        let plan = f.plan(&current, "/log-in", LinkType::Navigate, Layout::Narrow);
        assert_eq!(plan.len(), 1);
        assert!(plan.actions[0].payload().unwrap().is(screens::LOG_IN));
    }

    #[test]
    fn empty_live_state_is_unresolved() {
        let f = Fixture::new();
        let transition = f.classify(&RouteState::new(vec![]), "/", LinkType::Navigate, Layout::Narrow);
        assert_eq!(transition, Transition::Unresolved);
    }
}
