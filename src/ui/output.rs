//! ui::output
//!
//! Terminal output for the CLI.
//!
//! Human output goes to stdout and is silenced by `--quiet`. JSON output is
//! printed regardless of verbosity. Diagnostics go to stderr.

use std::fmt::Display;

use serde::Serialize;

use crate::core::state::RouteState;
use crate::linking::action::describe_route;

/// How much the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    /// `--debug`; also raises the log filter
    Debug,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn is_quiet(self) -> bool {
        self == Verbosity::Quiet
    }
}

/// Print a line to stdout unless quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{message}");
    }
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn error(message: impl Display) {
    eprintln!("error: {message}");
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        eprintln!("warning: {message}");
    }
}

/// One line per root route, bottom of the stack first, each shown as its
/// focused chain.
pub fn format_stack(state: &RouteState) -> String {
    state
        .routes()
        .iter()
        .map(|route| format!("  - {}", describe_route(route)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screens::{navigators, screens};
    use crate::core::state::Route;
    use crate::core::types::Params;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert!(!Verbosity::Debug.is_quiet());
    }

    #[test]
    fn stack_lists_each_root_route() {
        let state = RouteState::new(vec![
            Route::navigator(
                navigators::BOTTOM_TAB,
                RouteState::new(vec![Route::screen(screens::HOME, Params::new())]),
            ),
            Route::screen(screens::HOME_OVERVIEW, Params::new()),
        ]);

        let text = format_stack(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  - BottomTabNavigator > Home"));
        assert!(lines[1].starts_with("  - Home_Overview"));
    }

    #[test]
    fn empty_stack_is_blank() {
        assert_eq!(format_stack(&RouteState::new(Vec::new())), "");
    }
}
