//! config command - Show configuration

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::ui::output;

/// Print the merged configuration as TOML, with its sources as comments.
pub fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.json {
        output::print_json(&config.effective())?;
        return Ok(());
    }

    let toml = config.to_toml().context("Failed to render configuration")?;

    for (label, source) in [
        ("user", config.user_config_loaded_from()),
        ("project", config.project_config_loaded_from()),
    ] {
        let source = source.map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
        output::print(format!("# {label} config: {source}"), ctx.verbosity);
    }
    output::print(toml.trim_end(), ctx.verbosity);
    Ok(())
}
