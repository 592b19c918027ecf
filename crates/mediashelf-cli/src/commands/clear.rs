use super::{prompts, AppContext};
use color_eyre::Result;
use media_shelf_core::CollectionStore;
use serde_json::json;

pub async fn run_clear(ctx: &AppContext, yes: bool) -> Result<()> {
    let output = &ctx.output;
    let store = ctx.open_store();
    let count = store.read()?.len();

    if !yes {
        if !prompts::can_prompt() {
            return Err(color_eyre::eyre::eyre!("Refusing to clear the library without confirmation; pass --yes"));
        }
        let question = format!("Delete all {} reviews in {}?", count, ctx.library_file().display());
        if !prompts::prompt_yes_no(&question, Some(false), output)? {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let removed = store.clear()?;

    if !output.is_human() {
        let removed_count = if removed { count } else { 0 };
        output.json(&json!({
            "type": "cleared",
            "removed": removed_count
        }));
    } else if removed {
        output.success(format!("Cleared {} reviews from {}", count, ctx.library_file().display()));
    } else {
        output.info("Library is already empty, nothing to clear");
    }

    Ok(())
}
