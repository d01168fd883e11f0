//! resolve command - Parse and adapt a path

use anyhow::Result;
use serde_json::json;

use super::linker;
use crate::cli::Context;
use crate::core::types::Layout;
use crate::ui::output;

/// Print the raw and adapted trees of `path`.
pub fn resolve(ctx: &Context, path: &str, layout: Layout) -> Result<()> {
    let (raw, adapted) = linker()?.resolve(path, layout)?;

    if ctx.json {
        output::print_json(&json!({
            "path": path,
            "layout": layout,
            "raw": raw,
            "adapted": adapted.state,
            "metainfo": adapted.metainfo,
        }))?;
        return Ok(());
    }

    let mandatory = if adapted.metainfo.is_central_pane_and_bottom_tab_mandatory {
        "mandatory"
    } else {
        "defaulted"
    };

    output::print(format!("{path} ({layout})"), ctx.verbosity);
    output::print("raw:", ctx.verbosity);
    output::print(output::format_stack(&raw), ctx.verbosity);
    output::print(format!("adapted ({mandatory} companions):"), ctx.verbosity);
    output::print(output::format_stack(&adapted.state), ctx.verbosity);
    Ok(())
}
