//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads its inputs (paths, state files)
//! 2. Calls [`crate::linking`]
//! 3. Formats and displays output
//!
//! Handlers never talk to a real navigator; `plan --apply` runs against
//! [`crate::linking::MockNavigation`].

mod completion;
mod config_cmd;
mod href;
mod plan;
mod resolve;
mod routes;

pub use completion::completion;
pub use config_cmd::show as config_show;
pub use href::href;
pub use plan::plan;
pub use resolve::resolve;
pub use routes::routes;

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::args::{Command, ConfigAction};
use super::Context;
use crate::core::state::RouteState;
use crate::linking::Linker;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Resolve { path, layout } => resolve(ctx, &path, ctx.layout(layout)),
        Command::Plan {
            path,
            current,
            up,
            push,
            layout,
            apply,
        } => plan(
            ctx,
            &path,
            &current,
            Command::link_type(up, push),
            ctx.layout(layout),
            apply,
        ),
        Command::Href { state } => href(ctx, &state),
        Command::Routes => routes(ctx),
        Command::Config { action } => match action {
            ConfigAction::Show => config_show(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}

/// Linker over the built-in route table.
fn linker() -> Result<Linker> {
    Linker::kiroku().context("Invalid built-in route table")
}

/// Read a JSON route state from `path`, or stdin for `-`.
fn read_state(path: &Path) -> Result<RouteState> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read state from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file '{}'", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("Invalid state in '{}'", path.display()))
}
