//! linking::action
//!
//! Primitive navigation actions and ordered action plans.
//!
//! # Architecture
//!
//! Plans are the only thing that crosses from the planner to the
//! dispatcher. They are:
//! - **Deterministic**: the same live state and path give the same plan
//! - **Previewable**: rendered for humans by [`ActionPlan::preview`]
//! - **Serializable**: JSON shaped like the navigator's own action objects
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::state::Route;
//! use kiroku_nav::core::types::Params;
//! use kiroku_nav::linking::{ActionPlan, NavigationAction};
//!
//! let plan = ActionPlan::new("/home/overview")
//!     .with_action(NavigationAction::push(Route::screen("Home_Overview", Params::new()), None));
//!
//! assert!(!plan.is_empty());
//! assert!(plan.preview().contains("1. Push Home_Overview"));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::state::{Route, RouteState};
use crate::core::types::{NavigatorKey, Params};

/// A primitive action understood by the navigator.
///
/// `target` is the key of the navigator state the action applies to; `None`
/// means the root navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationAction {
    /// Go to a route, reusing an existing one with the same name.
    Navigate {
        payload: Route,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Add a route on top of the stack.
    Push {
        payload: Route,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Swap the top route of the stack.
    Replace {
        payload: Route,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Remove `count` routes from the top of the stack.
    Pop {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Remove everything but the first route.
    PopToTop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Replace the whole state of a navigator.
    Reset {
        state: RouteState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },

    /// Merge params into the focused route.
    SetParams {
        params: Params,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<NavigatorKey>,
    },
}

impl NavigationAction {
    pub fn navigate(payload: Route, target: Option<NavigatorKey>) -> Self {
        NavigationAction::Navigate { payload, target }
    }

    pub fn push(payload: Route, target: Option<NavigatorKey>) -> Self {
        NavigationAction::Push { payload, target }
    }

    pub fn replace(payload: Route, target: Option<NavigatorKey>) -> Self {
        NavigationAction::Replace { payload, target }
    }

    /// Pop a single route.
    pub fn pop(target: Option<NavigatorKey>) -> Self {
        NavigationAction::Pop { count: 1, target }
    }

    pub fn pop_to_top(target: Option<NavigatorKey>) -> Self {
        NavigationAction::PopToTop { target }
    }

    /// Key of the navigator this action applies to.
    pub fn target(&self) -> Option<&NavigatorKey> {
        match self {
            NavigationAction::Navigate { target, .. }
            | NavigationAction::Push { target, .. }
            | NavigationAction::Replace { target, .. }
            | NavigationAction::Pop { target, .. }
            | NavigationAction::PopToTop { target }
            | NavigationAction::Reset { target, .. }
            | NavigationAction::SetParams { target, .. } => target.as_ref(),
        }
    }

    /// Route carried by the action, for the kinds that carry one.
    pub fn payload(&self) -> Option<&Route> {
        match self {
            NavigationAction::Navigate { payload, .. }
            | NavigationAction::Push { payload, .. }
            | NavigationAction::Replace { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Wire name of the action type.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationAction::Navigate { .. } => "NAVIGATE",
            NavigationAction::Push { .. } => "PUSH",
            NavigationAction::Replace { .. } => "REPLACE",
            NavigationAction::Pop { .. } => "POP",
            NavigationAction::PopToTop { .. } => "POP_TO_TOP",
            NavigationAction::Reset { .. } => "RESET",
            NavigationAction::SetParams { .. } => "SET_PARAMS",
        }
    }

    /// Human-readable one-line description.
    pub fn description(&self) -> String {
        let on = describe_target(self.target());
        match self {
            NavigationAction::Navigate { payload, .. } => {
                format!("Navigate to {} in {}", describe_route(payload), on)
            }
            NavigationAction::Push { payload, .. } => {
                format!("Push {} onto {}", describe_route(payload), on)
            }
            NavigationAction::Replace { payload, .. } => {
                format!("Replace top of {} with {}", on, describe_route(payload))
            }
            NavigationAction::Pop { count, .. } => format!("Pop {} from {}", count, on),
            NavigationAction::PopToTop { .. } => format!("Pop {} to its first route", on),
            NavigationAction::Reset { state, .. } => {
                format!("Reset {} to {} routes", on, state.len())
            }
            NavigationAction::SetParams { params, .. } => {
                let keys: Vec<&str> = params.keys().map(String::as_str).collect();
                format!("Set params [{}] in {}", keys.join(", "), on)
            }
        }
    }
}

/// `Name(k=v, ...) > Child > Leaf` along the focused chain.
pub fn describe_route(route: &Route) -> String {
    route
        .focused_chain()
        .iter()
        .map(|r| {
            if r.params().is_empty() {
                r.name().to_string()
            } else {
                let params: Vec<String> =
                    r.params().iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{}({})", r.name(), params.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn describe_target(target: Option<&NavigatorKey>) -> String {
    match target {
        Some(key) => format!("'{key}'"),
        None => "root".to_string(),
    }
}

/// An ordered list of actions for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// The path that produced this plan.
    pub path: String,
    /// Actions in dispatch order.
    pub actions: Vec<NavigationAction>,
}

impl ActionPlan {
    /// Create an empty plan.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            actions: vec![],
        }
    }

    /// Add an action (builder pattern).
    pub fn with_action(mut self, action: NavigationAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an action.
    pub fn add(&mut self, action: NavigationAction) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Render a numbered, human-readable preview.
    pub fn preview(&self) -> String {
        if self.is_empty() {
            return format!("{}: No changes needed", self.path);
        }

        let mut lines = vec![format!("{}:", self.path)];
        for (i, action) in self.actions.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, action.description()));
        }
        lines.join("\n")
    }
}
