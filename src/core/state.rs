//! core::state
//!
//! Immutable navigation trees.
//!
//! # Model
//!
//! A [`RouteState`] is an ordered list of sibling [`Route`]s plus the index of
//! the focused one. A route is either a leaf [`Route::Screen`] or a
//! [`Route::Navigator`] that owns a nested state, so the depth of a tree is
//! encoded in the type rather than in an optional field.
//!
//! # Invariants
//!
//! - `index < routes.len()` whenever `routes` is non-empty
//! - Trees are values: every edit returns a new tree
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::state::{Route, RouteState};
//! use kiroku_nav::core::types::Params;
//!
//! let tab = Route::navigator(
//!     "BottomTabNavigator",
//!     RouteState::new(vec![Route::screen("Home", Params::new())]),
//! );
//! let state = RouteState::new(vec![tab]);
//!
//! assert_eq!(state.find_focused_leaf().unwrap().name(), "Home");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{NavigatorKey, Params, ScreenName};

/// Errors from building a state out of untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("index {index} is out of bounds for {len} routes")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A single addressable location in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RouteRepr", into = "RouteRepr")]
pub enum Route {
    /// A leaf screen.
    Screen { name: ScreenName, params: Params },
    /// A route that hosts a nested navigator.
    Navigator {
        name: ScreenName,
        params: Params,
        state: RouteState,
    },
}

impl Route {
    /// Build a leaf route from a screen constant.
    pub fn screen(name: &'static str, params: Params) -> Self {
        Route::Screen {
            name: ScreenName::from_static(name),
            params,
        }
    }

    /// Build a navigator route from a navigator constant.
    pub fn navigator(name: &'static str, state: RouteState) -> Self {
        Route::Navigator {
            name: ScreenName::from_static(name),
            params: Params::new(),
            state,
        }
    }

    /// Name of the screen or navigator.
    pub fn name(&self) -> &ScreenName {
        match self {
            Route::Screen { name, .. } | Route::Navigator { name, .. } => name,
        }
    }

    /// Parameters attached to this route.
    pub fn params(&self) -> &Params {
        match self {
            Route::Screen { params, .. } | Route::Navigator { params, .. } => params,
        }
    }

    /// Nested state, if this route hosts a navigator.
    pub fn state(&self) -> Option<&RouteState> {
        match self {
            Route::Screen { .. } => None,
            Route::Navigator { state, .. } => Some(state),
        }
    }

    /// Check if this route is named `name`.
    pub fn is(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Same screen with shallow-equal params.
    pub fn same_place(&self, other: &Route) -> bool {
        self.name() == other.name() && self.params() == other.params()
    }

    /// Return a copy of this route with `params` replaced.
    pub fn with_params(&self, params: Params) -> Route {
        match self {
            Route::Screen { name, .. } => Route::Screen {
                name: name.clone(),
                params,
            },
            Route::Navigator { name, state, .. } => Route::Navigator {
                name: name.clone(),
                params,
                state: state.clone(),
            },
        }
    }

    /// Deepest focused route below (and including) this one.
    ///
    /// A navigator with an empty nested state counts as a leaf.
    pub fn focused_leaf(&self) -> &Route {
        let mut current = self;
        while let Some(next) = current.state().and_then(RouteState::focused_route) {
            current = next;
        }
        current
    }

    /// Chain of focused routes from this one down to the focused leaf.
    pub fn focused_chain(&self) -> Vec<&Route> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(next) = current.state().and_then(RouteState::focused_route) {
            chain.push(next);
            current = next;
        }
        chain
    }
}

/// An ordered sequence of sibling routes with a focused index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RouteStateRepr", into = "RouteStateRepr")]
pub struct RouteState {
    key: Option<NavigatorKey>,
    routes: Vec<Route>,
    index: usize,
}

impl RouteState {
    /// Create a state focused on its last route.
    pub fn new(routes: Vec<Route>) -> Self {
        let index = routes.len().saturating_sub(1);
        Self {
            key: None,
            routes,
            index,
        }
    }

    /// Create a state with an explicit focused index.
    ///
    /// # Errors
    ///
    /// Returns `StateError::IndexOutOfBounds` if `index` does not point at a
    /// route of a non-empty list.
    pub fn with_index(routes: Vec<Route>, index: usize) -> Result<Self, StateError> {
        if !routes.is_empty() && index >= routes.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                len: routes.len(),
            });
        }
        let index = if routes.is_empty() { 0 } else { index };
        Ok(Self {
            key: None,
            routes,
            index,
        })
    }

    /// Return a copy of this state carrying the navigator key.
    pub fn keyed(mut self, key: NavigatorKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Key of the live navigator this state belongs to.
    pub fn key(&self) -> Option<&NavigatorKey> {
        self.key.as_ref()
    }

    /// All sibling routes, bottom of the stack first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Index of the focused route.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// The focused route at this level.
    pub fn focused_route(&self) -> Option<&Route> {
        self.routes.get(self.index)
    }

    /// The route on top of the stack.
    pub fn top(&self) -> Option<&Route> {
        self.routes.last()
    }

    /// The deepest focused route of the whole tree.
    pub fn find_focused_leaf(&self) -> Option<&Route> {
        self.focused_route().map(Route::focused_leaf)
    }

    /// First route named `name` at this level.
    pub fn find(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.is(name))
    }

    /// Last route named `name` at this level.
    pub fn find_last(&self, name: &str) -> Option<&Route> {
        self.routes.iter().rev().find(|route| route.is(name))
    }

    /// Last route at this level matching `predicate`.
    pub fn find_last_by(&self, predicate: impl Fn(&Route) -> bool) -> Option<&Route> {
        self.routes.iter().rev().find(|route| predicate(route))
    }

    /// New state with `route` pushed on top and focused.
    pub fn pushed(&self, route: Route) -> Self {
        let mut routes = self.routes.clone();
        routes.push(route);
        Self {
            key: self.key.clone(),
            index: routes.len() - 1,
            routes,
        }
    }

    /// New state with the top route removed.
    pub fn popped(&self) -> Self {
        self.truncated(self.routes.len().saturating_sub(1))
    }

    /// New state keeping only the first `len` routes (at least one).
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.max(1).min(self.routes.len());
        let routes = self.routes[..len].to_vec();
        Self {
            key: self.key.clone(),
            index: routes.len().saturating_sub(1),
            routes,
        }
    }

    /// New state with the top route replaced by `route`.
    pub fn replaced_top(&self, route: Route) -> Self {
        let mut routes = self.routes.clone();
        routes.pop();
        routes.push(route);
        Self {
            key: self.key.clone(),
            index: routes.len() - 1,
            routes,
        }
    }

    /// New state with every route passed through `f`, keeping key and focus.
    pub fn mapped(&self, f: impl FnMut(&Route) -> Route) -> Self {
        Self {
            key: self.key.clone(),
            routes: self.routes.iter().map(f).collect(),
            index: self.index,
        }
    }

    /// New state with the route at `position` swapped for `route`.
    pub fn replaced_at(&self, position: usize, route: Route) -> Self {
        let mut routes = self.routes.clone();
        if let Some(slot) = routes.get_mut(position) {
            *slot = route;
        }
        Self {
            key: self.key.clone(),
            index: self.index,
            routes,
        }
    }
}

/// Wire shape of a route: `{name, params?, state?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteRepr {
    name: ScreenName,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    params: Params,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<RouteState>,
}

impl From<RouteRepr> for Route {
    fn from(repr: RouteRepr) -> Self {
        match repr.state {
            None => Route::Screen {
                name: repr.name,
                params: repr.params,
            },
            Some(state) => Route::Navigator {
                name: repr.name,
                params: repr.params,
                state,
            },
        }
    }
}

impl From<Route> for RouteRepr {
    fn from(route: Route) -> Self {
        match route {
            Route::Screen { name, params } => RouteRepr {
                name,
                params,
                state: None,
            },
            Route::Navigator {
                name,
                params,
                state,
            } => RouteRepr {
                name,
                params,
                state: Some(state),
            },
        }
    }
}

/// Wire shape of a state: `{key?, routes, index?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteStateRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<NavigatorKey>,
    routes: Vec<Route>,
    #[serde(default)]
    index: Option<usize>,
}

impl TryFrom<RouteStateRepr> for RouteState {
    type Error = StateError;

    fn try_from(repr: RouteStateRepr) -> Result<Self, Self::Error> {
        let state = match repr.index {
            Some(index) => RouteState::with_index(repr.routes, index)?,
            None => RouteState::new(repr.routes),
        };
        Ok(match repr.key {
            Some(key) => state.keyed(key),
            None => state,
        })
    }
}

impl From<RouteState> for RouteStateRepr {
    fn from(state: RouteState) -> Self {
        RouteStateRepr {
            key: state.key,
            routes: state.routes,
            index: Some(state.index),
        }
    }
}
