//! kiroku-nav - Deep-link resolution and navigation-state reconciliation
//!
//! Turns URL-like paths into navigation trees for the Kiroku app and drives
//! a live navigator to them with the fewest primitive actions that keep its
//! back-history intact.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to linking)
//! - [`linking`] - Parse → Adapt → Plan → Dispatch pipeline
//! - [`core`] - Domain types, route trees, route registry, topology, config
//! - [`ui`] - Output helpers
//!
//! # Correctness Invariants
//!
//! kiroku-nav maintains the following invariants:
//!
//! 1. Every adapted state has a bottom tab that matches its central pane
//! 2. Companion routes are always dispatched before the overlay they support
//! 3. Following the same link twice dispatches nothing the second time
//! 4. Bad paths never reach the navigator

pub mod cli;
pub mod core;
pub mod linking;
pub mod ui;
