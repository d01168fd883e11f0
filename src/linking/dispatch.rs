//! linking::dispatch
//!
//! Entry points that talk to a live navigator.
//!
//! # Overview
//!
//! [`Linker`] owns the registry and topology and exposes:
//!
//! - [`Linker::plan`] - pure: path + live state → target and action plan
//! - [`Linker::link_to`] - runs the pipeline against a [`NavigationRef`] and
//!   dispatches the plan
//! - [`Linker::dismiss_modal`] - pops the top overlay
//!
//! Neither entry point returns an error. Fatal problems are logged and
//! reported through [`LinkOutcome`]; the live navigator is left untouched.
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::state::{Route, RouteState};
//! use kiroku_nav::core::types::{Layout, LinkType, Params};
//! use kiroku_nav::linking::{LinkOutcome, Linker, MockNavigation};
//!
//! let linker = Linker::kiroku().unwrap();
//! let tabs = Route::navigator(
//!     "BottomTabNavigator",
//!     RouteState::new(vec![Route::screen("Home", Params::new())]),
//! );
//! let nav = MockNavigation::new(RouteState::new(vec![tabs]));
//!
//! let outcome = linker.link_to(&nav, "/day/2024-05-01", LinkType::Navigate, Layout::Wide);
//! assert!(matches!(outcome, LinkOutcome::Dispatched { .. }));
//!
//! let again = linker.link_to(&nav, "/day/2024-05-01", LinkType::Navigate, Layout::Wide);
//! assert_eq!(again, LinkOutcome::Unchanged);
//! ```

use tracing::{debug, error, warn};

use crate::core::registry::{kiroku, RegistryError, RouteRegistry};
use crate::core::state::RouteState;
use crate::core::topology::Topology;
use crate::core::types::{Layout, LinkType};

use super::action::{ActionPlan, NavigationAction};
use super::adapt::{AdaptedState, StateAdapter};
use super::parse::parse_path;
use super::plan::{Planner, Transition};
use super::LinkingError;

/// Handle on a live navigator.
///
/// Implemented by the navigation container. Calls never fail; a handle
/// that is not ready yet reports so through [`NavigationRef::is_ready`].
pub trait NavigationRef {
    /// Whether the navigator is mounted and accepts actions.
    fn is_ready(&self) -> bool;

    /// Current state of the navigator behind this handle.
    fn state(&self) -> Option<RouteState>;

    /// Apply a single action.
    fn dispatch(&self, action: NavigationAction);

    /// Replace the whole state of the navigator behind this handle.
    fn reset(&self, state: RouteState);

    /// Handle of the enclosing navigator, if any.
    fn parent(&self) -> Option<&dyn NavigationRef>;
}

/// The outermost navigator reachable from `nav`.
fn root_of(nav: &dyn NavigationRef) -> &dyn NavigationRef {
    let mut current = nav;
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

/// What a `link_to` or `dismiss_modal` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Actions were dispatched, in this order.
    Dispatched { actions: Vec<NavigationAction> },
    /// The navigator already shows the target, or there was nothing to do.
    Unchanged,
    /// The navigator is not ready; nothing was dispatched.
    Deferred,
    /// No action sequence fit, so the navigator was reset to this state.
    Reset { state: RouteState },
    /// The request failed before anything was dispatched.
    Aborted { error: LinkingError },
}

/// Result of planning a link without dispatching it.
#[derive(Debug, Clone)]
pub struct PlannedLink {
    /// Tree parsed from the path.
    pub raw: RouteState,
    /// Target the navigator should end up in.
    pub adapted: AdaptedState,
    /// Classification of the move.
    pub transition: Transition,
    /// Actions to dispatch; `None` when only a reset can reach the target.
    pub plan: Option<ActionPlan>,
}

/// Resolves paths against the app's routes and drives a navigator there.
#[derive(Debug, Clone)]
pub struct Linker {
    registry: RouteRegistry,
    topology: Topology,
}

impl Linker {
    pub fn new(registry: RouteRegistry, topology: Topology) -> Self {
        Self { registry, topology }
    }

    /// Linker over the Kiroku route table.
    pub fn kiroku() -> Result<Self, RegistryError> {
        Ok(Self::new(kiroku::registry()?, Topology::kiroku()))
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Parse and adapt `path` without looking at a live state.
    ///
    /// # Errors
    ///
    /// Returns `LinkingError::PathUnparseable` or
    /// `LinkingError::AdaptationImpossible`.
    pub fn resolve(
        &self,
        path: &str,
        layout: Layout,
    ) -> Result<(RouteState, AdaptedState), LinkingError> {
        let raw = parse_path(path, &self.registry)?;
        let adapted = StateAdapter::new(&self.registry, &self.topology, layout).adapt(&raw)?;
        Ok((raw, adapted))
    }

    /// Plan the move from `current` to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Linker::resolve`].
    pub fn plan(
        &self,
        current: &RouteState,
        path: &str,
        link_type: LinkType,
        layout: Layout,
    ) -> Result<PlannedLink, LinkingError> {
        let (raw, adapted) = self.resolve(path, layout)?;
        let transition = Planner::new(&self.registry, &self.topology, layout)
            .classify(current, &raw, &adapted, link_type);
        let plan = transition.clone().into_plan(path);

        Ok(PlannedLink {
            raw,
            adapted,
            transition,
            plan,
        })
    }

    /// Drive the navigator behind `nav` to `path`.
    pub fn link_to(
        &self,
        nav: &dyn NavigationRef,
        path: &str,
        link_type: LinkType,
        layout: Layout,
    ) -> LinkOutcome {
        let root = root_of(nav);
        if !root.is_ready() {
            debug!(path, "navigator not ready, deferring link");
            return LinkOutcome::Deferred;
        }
        let Some(current) = root.state() else {
            debug!(path, "navigator has no state yet, deferring link");
            return LinkOutcome::Deferred;
        };

        let planned = match self.plan(&current, path, link_type, layout) {
            Ok(planned) => planned,
            Err(error) => {
                error!(path, %error, "cannot link");
                return LinkOutcome::Aborted { error };
            }
        };

        if planned.transition == Transition::NothingToDismiss {
            warn!(path, "{}", LinkingError::DismissWithNoStackToDismiss);
        }

        match planned.plan {
            Some(plan) if plan.is_empty() => {
                debug!(path, "already there");
                LinkOutcome::Unchanged
            }
            Some(plan) => {
                debug!(path, actions = plan.len(), "dispatching\n{}", plan.preview());
                for action in &plan.actions {
                    root.dispatch(action.clone());
                }
                LinkOutcome::Dispatched {
                    actions: plan.actions,
                }
            }
            None => {
                warn!(path, "no action sequence reaches the target, resetting");
                let state = planned.adapted.state;
                root.reset(state.clone());
                LinkOutcome::Reset { state }
            }
        }
    }

    /// Pop the overlay on top of the root stack.
    ///
    /// Only left/right modals, flow modals and the not-found screen are
    /// dismissible.
    pub fn dismiss_modal(&self, nav: &dyn NavigationRef) -> LinkOutcome {
        let root = root_of(nav);
        if !root.is_ready() {
            return LinkOutcome::Deferred;
        }
        let Some(current) = root.state() else {
            return LinkOutcome::Deferred;
        };

        match current.top() {
            Some(top) if current.len() > 1 && self.topology.is_dismissible(top.name().as_str()) => {
                let action = NavigationAction::pop(current.key().cloned());
                debug!(screen = %top.name(), "dismissing");
                root.dispatch(action.clone());
                LinkOutcome::Dispatched {
                    actions: vec![action],
                }
            }
            _ => {
                warn!("{}", LinkingError::DismissWithNoStackToDismiss);
                LinkOutcome::Unchanged
            }
        }
    }
}
