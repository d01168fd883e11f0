//! plan command - Plan the actions that take a live state to a path

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;

use super::{linker, read_state};
use crate::cli::Context;
use crate::core::types::{Layout, LinkType};
use crate::linking::{LinkOutcome, MockNavigation, NavigationRef};
use crate::ui::output;

/// Print the plan from the state in `current` to `path`.
///
/// With `apply`, also run it against an in-memory navigator and print the
/// resulting state.
pub fn plan(
    ctx: &Context,
    path: &str,
    current: &Path,
    link_type: LinkType,
    layout: Layout,
    apply: bool,
) -> Result<()> {
    let linker = linker()?;
    // Keys the live state the way a container would, so actions can target
    // nested navigators.
    let nav = MockNavigation::new(read_state(current)?);
    let live = nav.current();

    let planned = linker.plan(&live, path, link_type, layout)?;
    let outcome = if apply {
        Some(linker.link_to(&nav, path, link_type, layout))
    } else {
        None
    };
    if let Some(LinkOutcome::Aborted { error }) = &outcome {
        bail!("{error}");
    }
    let result = outcome.as_ref().and_then(|_| nav.state());

    if ctx.json {
        output::print_json(&json!({
            "path": path,
            "layout": layout,
            "actions": planned.plan.as_ref().map(|plan| &plan.actions),
            "reset": planned.plan.is_none().then_some(&planned.adapted.state),
            "result": result,
        }))?;
        return Ok(());
    }

    match &planned.plan {
        Some(plan) => output::print(plan.preview(), ctx.verbosity),
        None => {
            output::print(
                format!("{path}: no action sequence fits, the navigator is reset to:"),
                ctx.verbosity,
            );
            output::print(output::format_stack(&planned.adapted.state), ctx.verbosity);
        }
    }

    if let Some(result) = result {
        output::print("result:", ctx.verbosity);
        output::print(output::format_stack(&result), ctx.verbosity);
    }
    Ok(())
}
