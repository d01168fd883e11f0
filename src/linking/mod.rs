//! linking
//!
//! Turns deep-link paths into navigation trees and the live tree into the
//! target tree.
//!
//! # Pipeline
//!
//! Every request runs the same phases:
//!
//! ```text
//! path ──parse──▶ raw tree ──adapt──▶ AdaptedState ──plan──▶ ActionPlan ──dispatch──▶ NavigationRef
//! ```
//!
//! - [`parse`] - match a path against the registry, build the raw tree
//! - [`adapt`] - enforce the bottom tab / central pane / overlay shape
//! - [`diff`] - companion routes missing from the live tree
//! - [`plan`] - classify the transition, then derive primitive actions
//! - [`dispatch`] - `link_to` and `dismiss_modal` against a live navigator
//! - [`mock`] - in-memory navigator for tests and the CLI
//!
//! # Invariants
//!
//! - Parsing, adapting and planning are pure
//! - The dispatcher is the only component that talks to the navigator
//! - Actions are dispatched in plan order: tab before central pane,
//!   dismissal before a new overlay, companions before the overlay

pub mod action;
pub mod adapt;
pub mod diff;
pub mod dispatch;
pub mod mock;
pub mod parse;
pub mod plan;

pub use action::{ActionPlan, NavigationAction};
pub use adapt::{AdaptedState, Metainfo, StateAdapter};
pub use dispatch::{LinkOutcome, Linker, NavigationRef};
pub use mock::MockNavigation;
pub use parse::{parse_path, path_from_state};
pub use plan::{Planner, Transition};

use thiserror::Error;

/// Errors raised while resolving a link.
///
/// `PathUnparseable` and `AdaptationImpossible` abort the request.
/// `NoMatchingRootRoute` and `DismissWithNoStackToDismiss` are only ever
/// logged; the request continues in a degraded form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkingError {
    #[error("no route matches path '{path}'")]
    PathUnparseable { path: String },

    #[error("parsed state is empty, nothing to adapt")]
    AdaptationImpossible,

    #[error("no central pane or bottom tab is declared under '{screen}'")]
    NoMatchingRootRoute { screen: String },

    #[error("no modal stack to dismiss")]
    DismissWithNoStackToDismiss,

    #[error("cannot build a path for '{screen}': {reason}")]
    PathUnserializable { screen: String, reason: String },
}
