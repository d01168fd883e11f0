//! linking::parse
//!
//! Path ⇄ raw navigation tree.
//!
//! # Parsing
//!
//! [`parse_path`] tries the registry's patterns in order (most specific
//! first) and builds the chain of navigators enclosing the matched screen.
//! Query parameters are attached to the focused leaf; path parameters win
//! over query parameters of the same name.
//!
//! Nested navigators that declare an initial route get it placed below the
//! matched child. The root level never does.
//!
//! # Serializing
//!
//! [`path_from_state`] is the inverse for the focused chain of a tree.
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::registry::kiroku;
//! use kiroku_nav::linking::{parse_path, path_from_state};
//!
//! let registry = kiroku::registry().unwrap();
//! let state = parse_path("/day/2024-05-01", &registry).unwrap();
//!
//! let leaf = state.find_focused_leaf().unwrap();
//! assert_eq!(leaf.name(), "DayOverview_Root");
//! assert_eq!(leaf.params()["date"], "2024-05-01");
//!
//! assert_eq!(path_from_state(&state, &registry).unwrap(), "/day/2024-05-01");
//! ```

use super::LinkingError;
use crate::core::registry::{RouteRegistry, Segment};
use crate::core::state::{Route, RouteState};
use crate::core::types::{Params, ScreenName};

/// Parse `path` into a raw tree.
///
/// A missing leading `/` is added.
///
/// # Errors
///
/// Returns `LinkingError::PathUnparseable` if no pattern matches.
pub fn parse_path(path: &str, registry: &RouteRegistry) -> Result<RouteState, LinkingError> {
    let (path_part, query) = match path.split_once('?') {
        Some((path_part, query)) => (path_part, Some(query)),
        None => (path, None),
    };
    let segments: Vec<&str> = path_part.split('/').filter(|s| !s.is_empty()).collect();

    let (matched, path_params) = registry
        .patterns()
        .iter()
        .find_map(|candidate| {
            candidate
                .pattern()
                .matches(&segments)
                .map(|params| (candidate, params))
        })
        .ok_or_else(|| LinkingError::PathUnparseable {
            path: normalize(path),
        })?;

    let mut params = query.map(parse_query).unwrap_or_default();
    params.extend(path_params);

    let mut route = default_route(registry, matched.screen(), params);
    for parent in matched.parent_screens().iter().rev() {
        route = wrap(registry, parent, route);
    }

    Ok(RouteState::new(vec![route]))
}

/// Build the path of the focused chain of `state`.
///
/// Parameters named by the focused leaf's pattern fill its placeholders;
/// the rest go to the query string, sorted by key.
///
/// # Errors
///
/// Returns `LinkingError::PathUnserializable` if the focused leaf has no
/// pattern, its pattern is a wildcard, or a required parameter is missing.
pub fn path_from_state(state: &RouteState, registry: &RouteRegistry) -> Result<String, LinkingError> {
    let leaf = state
        .find_focused_leaf()
        .ok_or_else(|| LinkingError::PathUnserializable {
            screen: String::new(),
            reason: "state is empty".into(),
        })?;
    let unserializable = |reason: &str| LinkingError::PathUnserializable {
        screen: leaf.name().to_string(),
        reason: reason.to_string(),
    };

    let pattern = registry
        .pattern_for(leaf.name().as_str())
        .ok_or_else(|| unserializable("screen has no path pattern"))?
        .pattern();

    let mut remaining = leaf.params().clone();
    let mut segments = Vec::new();
    for segment in pattern.segments() {
        match segment {
            Segment::Static(text) => segments.push(text.clone()),
            Segment::Param { name, optional } => match remaining.remove(name) {
                Some(value) => segments.push(urlencoding::encode(&value).into_owned()),
                None if *optional => {}
                None => return Err(unserializable(&format!("missing parameter '{name}'"))),
            },
            Segment::Wildcard => return Err(unserializable("wildcard patterns have no path")),
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    if !remaining.is_empty() {
        let query: Vec<String> = remaining
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        path.push('?');
        path.push_str(&query.join("&"));
    }
    Ok(path)
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Decode `a=1&b=two%20words`. Keys without `=` get an empty value.
fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(text: &str) -> String {
    let text = text.replace('+', " ");
    match urlencoding::decode(&text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text,
    }
}

/// Route for `name`, descending into default children when it is a
/// navigator. `params` end up on the deepest route.
fn default_route(registry: &RouteRegistry, name: &ScreenName, params: Params) -> Route {
    match registry.navigator(name.as_str()).and_then(|n| n.default_child()) {
        Some(child) => Route::Navigator {
            name: name.clone(),
            params: Params::new(),
            state: RouteState::new(vec![default_route(registry, child, params)]),
        },
        None => Route::Screen {
            name: name.clone(),
            params,
        },
    }
}

/// Host `child` in the navigator `parent`, below its initial route if it
/// has a different one.
fn wrap(registry: &RouteRegistry, parent: &ScreenName, child: Route) -> Route {
    let initial = registry
        .navigator(parent.as_str())
        .and_then(|n| n.initial_route_name.as_ref())
        .filter(|initial| *initial != child.name());

    let routes = match initial {
        Some(initial) => vec![default_route(registry, initial, Params::new()), child],
        None => vec![child],
    };

    Route::Navigator {
        name: parent.clone(),
        params: Params::new(),
        state: RouteState::new(routes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{kiroku, LinkingConfig, NestedConfig};
    use crate::core::screens::{navigators, screens};

    fn registry() -> RouteRegistry {
        kiroku::registry().unwrap()
    }

    fn names(route: &Route) -> Vec<&str> {
        route.focused_chain().iter().map(|r| r.name().as_str()).collect()
    }

    mod parsing {
        use super::*;

        #[test]
        fn root_path_is_default_bottom_tab() {
            let state = parse_path("/", &registry()).unwrap();
            assert_eq!(state.len(), 1);
            assert_eq!(
                names(&state.routes()[0]),
                vec![navigators::BOTTOM_TAB, screens::HOME]
            );
        }

        #[test]
        fn missing_slash_is_added() {
            let state = parse_path("settings/account", &registry()).unwrap();
            let leaf = state.find_focused_leaf().unwrap();
            assert!(leaf.is(screens::settings::ACCOUNT));
        }

        #[test]
        fn builds_full_navigator_chain() {
            let state = parse_path("/drinking-session/abc/live", &registry()).unwrap();
            assert_eq!(
                names(&state.routes()[0]),
                vec![
                    navigators::RIGHT_MODAL,
                    screens::right_modal::DRINKING_SESSION,
                    screens::drinking_session::LIVE
                ]
            );
            let leaf = state.find_focused_leaf().unwrap();
            assert_eq!(leaf.params()["sessionId"], "abc");
        }

        #[test]
        fn non_initial_tab_gets_initial_below() {
            let state = parse_path("/statistics", &registry()).unwrap();
            let tabs = state.routes()[0].state().unwrap();
            let tab_names: Vec<&str> = tabs.routes().iter().map(|r| r.name().as_str()).collect();
            assert_eq!(tab_names, vec![screens::HOME, screens::STATISTICS_TAB]);
            assert_eq!(tabs.index(), 1);
        }

        #[test]
        fn central_panes_are_root_routes() {
            let state = parse_path("/statistics/period/week", &registry()).unwrap();
            let route = &state.routes()[0];
            assert!(route.is(screens::STATISTICS_PERIOD));
            assert!(route.state().is_none());
            assert_eq!(route.params()["period"], "week");
        }

        #[test]
        fn unknown_path_is_not_found() {
            let state = parse_path("/no/such/place", &registry()).unwrap();
            assert!(state.routes()[0].is(screens::NOT_FOUND));
        }

        #[test]
        fn unparseable_without_catch_all() {
            let config = LinkingConfig::new().screen("Home", "home");
            let registry = RouteRegistry::from_config(&config).unwrap();
            assert_eq!(
                parse_path("elsewhere", &registry).unwrap_err(),
                LinkingError::PathUnparseable {
                    path: "/elsewhere".into()
                }
            );
        }
    }

    mod query {
        use super::*;

        #[test]
        fn query_params_reach_the_leaf() {
            let state =
                parse_path("/day/2024-05-01?backTo=%2Fstatistics%2Foverview", &registry()).unwrap();
            let leaf = state.find_focused_leaf().unwrap();
            assert_eq!(leaf.params()["date"], "2024-05-01");
            assert_eq!(leaf.params()["backTo"], "/statistics/overview");
        }

        #[test]
        fn path_params_win() {
            let state = parse_path("/day/2024-05-01?date=other", &registry()).unwrap();
            assert_eq!(
                state.find_focused_leaf().unwrap().params()["date"],
                "2024-05-01"
            );
        }

        #[test]
        fn flags_and_plus_signs() {
            let params = parse_query("flag&name=a+b&&x=%26");
            assert_eq!(params["flag"], "");
            assert_eq!(params["name"], "a b");
            assert_eq!(params["x"], "&");
        }
    }

    mod navigator_targets {
        use super::*;

        #[test]
        fn navigator_match_opens_default_child() {
            let config = LinkingConfig::new().navigator(
                "Settings",
                NestedConfig::new()
                    .path("settings")
                    .initial("General")
                    .screen("Account", "account")
                    .screen("General", "general"),
            );
            let registry = RouteRegistry::from_config(&config).unwrap();

            let state = parse_path("/settings", &registry).unwrap();
            assert_eq!(names(&state.routes()[0]), vec!["Settings", "General"]);

            let state = parse_path("/settings/account", &registry).unwrap();
            let nested = state.routes()[0].state().unwrap();
            assert_eq!(nested.len(), 2);
            assert!(nested.routes()[0].is("General"));
            assert!(nested.top().unwrap().is("Account"));
        }
    }

    mod serialize {
        use super::*;

        #[test]
        fn fills_placeholders_and_query() {
            let registry = registry();
            let state = parse_path("/profile/u%201/friends?tab=mutual", &registry).unwrap();
            assert_eq!(
                path_from_state(&state, &registry).unwrap(),
                "/profile/u%201/friends?tab=mutual"
            );
        }

        #[test]
        fn bottom_tab_serializes_its_tab() {
            let registry = registry();
            let state = parse_path("/", &registry).unwrap();
            assert_eq!(path_from_state(&state, &registry).unwrap(), "/home");
        }

        #[test]
        fn wildcard_cannot_be_serialized() {
            let registry = registry();
            let state = parse_path("/nowhere", &registry).unwrap();
            assert!(matches!(
                path_from_state(&state, &registry),
                Err(LinkingError::PathUnserializable { .. })
            ));
        }

        #[test]
        fn missing_param_is_an_error() {
            let registry = registry();
            let state = RouteState::new(vec![Route::screen(
                screens::STATISTICS_PERIOD,
                Params::new(),
            )]);
            assert!(path_from_state(&state, &registry).is_err());
        }
    }
}
