//! linking::mock
//!
//! In-memory navigator for deterministic testing.
//!
//! # Design
//!
//! [`MockNavigation`] holds a root state and applies dispatched actions with
//! stack semantics. Every navigator state gets a key on entry (`root` for the
//! root, `{Name}-{n}` below it) so planned actions can target nested
//! navigators the same way they target a live container. All dispatched
//! actions and resets are recorded for verification.
//!
//! Actions aimed at an unknown key are recorded and otherwise ignored.
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::state::{Route, RouteState};
//! use kiroku_nav::core::types::Params;
//! use kiroku_nav::linking::{MockNavigation, NavigationAction, NavigationRef};
//!
//! let nav = MockNavigation::new(RouteState::new(vec![Route::screen("Home", Params::new())]));
//! nav.dispatch(NavigationAction::push(Route::screen("LogIn", Params::new()), None));
//!
//! assert_eq!(nav.current().len(), 2);
//! assert_eq!(nav.dispatched().len(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::action::NavigationAction;
use super::dispatch::NavigationRef;
use crate::core::state::{Route, RouteState};
use crate::core::types::{NavigatorKey, Params};

const ROOT_KEY: &str = "root";

/// Mock navigator.
///
/// Clones share state through an internal `Arc<Mutex<...>>`.
#[derive(Debug, Clone)]
pub struct MockNavigation {
    inner: Arc<Mutex<MockInner>>,
    parent: Option<Box<MockNavigation>>,
}

#[derive(Debug)]
struct MockInner {
    state: RouteState,
    ready: bool,
    dispatched: Vec<NavigationAction>,
    resets: Vec<RouteState>,
    next_key: usize,
}

impl MockNavigation {
    /// Create a ready navigator showing `state`.
    pub fn new(state: RouteState) -> Self {
        let mut inner = MockInner {
            state: RouteState::default(),
            ready: true,
            dispatched: Vec::new(),
            resets: Vec::new(),
            next_key: 1,
        };
        inner.state = inner.key_root(&state);

        Self {
            inner: Arc::new(Mutex::new(inner)),
            parent: None,
        }
    }

    /// Handle on a nested navigator whose parent is this one.
    pub fn child(&self) -> MockNavigation {
        Self {
            inner: Arc::clone(&self.inner),
            parent: Some(Box::new(self.clone())),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    /// Current root state.
    pub fn current(&self) -> RouteState {
        self.lock().state.clone()
    }

    /// Every action dispatched so far, in order.
    pub fn dispatched(&self) -> Vec<NavigationAction> {
        self.lock().dispatched.clone()
    }

    /// Every state passed to `reset`, in order.
    pub fn resets(&self) -> Vec<RouteState> {
        self.lock().resets.clone()
    }

    /// Forget recorded actions and resets, keeping the state.
    pub fn clear_history(&self) {
        let mut inner = self.lock();
        inner.dispatched.clear();
        inner.resets.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NavigationRef for MockNavigation {
    fn is_ready(&self) -> bool {
        self.lock().ready
    }

    /// The root state for the root handle; the focused nested state for a
    /// child handle.
    fn state(&self) -> Option<RouteState> {
        let inner = self.lock();
        match self.parent {
            None => Some(inner.state.clone()),
            Some(_) => inner
                .state
                .focused_route()
                .and_then(Route::state)
                .cloned(),
        }
    }

    fn dispatch(&self, action: NavigationAction) {
        let mut inner = self.lock();
        inner.apply(&action);
        inner.dispatched.push(action);
    }

    fn reset(&self, state: RouteState) {
        let mut inner = self.lock();
        inner.resets.push(state.clone());
        let next = inner.key_root(&state);
        inner.state = next;
    }

    fn parent(&self) -> Option<&dyn NavigationRef> {
        self.parent.as_deref().map(|parent| parent as &dyn NavigationRef)
    }
}

impl MockInner {
    fn fresh_key(&mut self, name: &str) -> Option<NavigatorKey> {
        let key = NavigatorKey::new(format!("{name}-{}", self.next_key)).ok()?;
        self.next_key += 1;
        Some(key)
    }

    /// Copy of `route` with a key on every nested state that lacks one.
    fn key_route(&mut self, route: &Route) -> Route {
        match route {
            Route::Screen { .. } => route.clone(),
            Route::Navigator {
                name,
                params,
                state,
            } => {
                let mut keyed = state.mapped(|child| self.key_route(child));
                if keyed.key().is_none() {
                    if let Some(key) = self.fresh_key(name.as_str()) {
                        keyed = keyed.keyed(key);
                    }
                }
                Route::Navigator {
                    name: name.clone(),
                    params: params.clone(),
                    state: keyed,
                }
            }
        }
    }

    fn key_root(&mut self, state: &RouteState) -> RouteState {
        let keyed = state.mapped(|route| self.key_route(route));
        match NavigatorKey::new(ROOT_KEY) {
            Ok(key) if keyed.key().is_none() => keyed.keyed(key),
            _ => keyed,
        }
    }

    fn apply(&mut self, action: &NavigationAction) {
        let Some(target) = action.target().or(self.state.key()).cloned() else {
            return;
        };

        let payload = action.payload().map(|route| self.key_route(route));
        let replacement = match action {
            NavigationAction::Reset { state, .. } => Some(self.key_root(state)),
            _ => None,
        };

        let mut reduce = |state: &RouteState| match action {
            NavigationAction::Push { .. } => match &payload {
                Some(route) => state.pushed(route.clone()),
                None => state.clone(),
            },
            NavigationAction::Navigate { .. } => match &payload {
                Some(route) => navigate(state, route.clone()),
                None => state.clone(),
            },
            NavigationAction::Replace { .. } => match &payload {
                Some(route) if state.is_empty() => state.pushed(route.clone()),
                Some(route) => state.replaced_top(route.clone()),
                None => state.clone(),
            },
            NavigationAction::Pop { count, .. } => {
                state.truncated(state.len().saturating_sub(*count))
            }
            NavigationAction::PopToTop { .. } => state.truncated(1),
            NavigationAction::Reset { .. } => match (&replacement, state.key()) {
                (Some(next), Some(key)) => next.clone().keyed(key.clone()),
                (Some(next), None) => next.clone(),
                (None, _) => state.clone(),
            },
            NavigationAction::SetParams { params, .. } => set_params(state, params),
        };

        if let Some(next) = update_keyed(&self.state, &target, &mut reduce) {
            self.state = next;
        }
    }
}

/// Go back to the last route named like `route` and swap it in, else push.
fn navigate(state: &RouteState, route: Route) -> RouteState {
    match state.routes().iter().rposition(|r| r.name() == route.name()) {
        Some(position) => state.truncated(position + 1).replaced_top(route),
        None => state.pushed(route),
    }
}

fn set_params(state: &RouteState, params: &Params) -> RouteState {
    match state.focused_route() {
        Some(focused) => {
            let mut merged = focused.params().clone();
            merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
            state.replaced_at(state.index(), focused.with_params(merged))
        }
        None => state.clone(),
    }
}

/// Apply `reduce` to the state keyed `target`, rebuilding its ancestors.
fn update_keyed(
    state: &RouteState,
    target: &NavigatorKey,
    reduce: &mut dyn FnMut(&RouteState) -> RouteState,
) -> Option<RouteState> {
    if state.key() == Some(target) {
        return Some(reduce(state));
    }
    for (position, route) in state.routes().iter().enumerate() {
        if let Route::Navigator {
            name,
            params,
            state: nested,
        } = route
        {
            if let Some(updated) = update_keyed(nested, target, reduce) {
                let rebuilt = Route::Navigator {
                    name: name.clone(),
                    params: params.clone(),
                    state: updated,
                };
                return Some(state.replaced_at(position, rebuilt));
            }
        }
    }
    None
}
