//! routes command - List route patterns in match order

use anyhow::Result;
use serde_json::json;

use super::linker;
use crate::cli::Context;
use crate::ui::output;

/// List every pattern with its screen and enclosing navigators.
pub fn routes(ctx: &Context) -> Result<()> {
    let linker = linker()?;
    let patterns = linker.registry().patterns();

    if ctx.json {
        let entries: Vec<_> = patterns
            .iter()
            .map(|route| {
                json!({
                    "pattern": route.pattern().as_str(),
                    "screen": route.screen(),
                    "parents": route.parent_screens(),
                })
            })
            .collect();
        output::print_json(&entries)?;
        return Ok(());
    }

    let width = patterns
        .iter()
        .map(|route| route.pattern().as_str().len() + 1)
        .max()
        .unwrap_or(0);

    for route in patterns {
        let pattern = format!("/{}", route.pattern().as_str());
        let mut chain: Vec<&str> = route.parent_screens().iter().map(|p| p.as_str()).collect();
        chain.push(route.screen().as_str());
        output::print(
            format!("{pattern:<width$}  {}", chain.join(" > ")),
            ctx.verbosity,
        );
    }
    Ok(())
}
