//! core
//!
//! Core domain types and static tables for kiroku-nav.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ScreenName, NavigatorKey, Layout, etc.
//! - [`screens`] - Screen and navigator identifiers of the app
//! - [`state`] - Immutable navigation trees
//! - [`registry`] - Path patterns and the navigators that host them
//! - [`topology`] - Layer classification and tab/central/modal mapping tables
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Trees are values, never edited in place
//! - Nothing here dispatches or performs navigation

pub mod config;
pub mod registry;
pub mod screens;
pub mod state;
pub mod topology;
pub mod types;
