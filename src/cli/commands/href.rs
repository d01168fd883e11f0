//! href command - Print the path of a state

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::{linker, read_state};
use crate::cli::Context;
use crate::linking::path_from_state;
use crate::ui::output;

/// Print the path that leads to the focused screen of the state in `file`.
pub fn href(ctx: &Context, file: &Path) -> Result<()> {
    let linker = linker()?;
    let state = read_state(file)?;
    let path = path_from_state(&state, linker.registry())?;

    if ctx.json {
        output::print_json(&json!({ "path": path }))?;
    } else {
        // Printed even in quiet mode; the path is the whole result.
        println!("{path}");
    }
    Ok(())
}
