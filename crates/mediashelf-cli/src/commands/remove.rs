use super::{prompts, resolve_item, AppContext};
use color_eyre::Result;
use serde_json::json;

pub async fn run_remove(ctx: &AppContext, id: &str, yes: bool) -> Result<()> {
    let output = &ctx.output;
    let lifecycle = ctx.open_lifecycle();
    let items = lifecycle.items()?;
    let target = resolve_item(&items, id)?;

    if !yes {
        if !prompts::can_prompt() {
            return Err(color_eyre::eyre::eyre!("Refusing to remove without confirmation; pass --yes"));
        }
        let question = format!("Remove {} \"{}\"?", target.media_type, target.title);
        if !prompts::prompt_yes_no(&question, Some(false), output)? {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let removed = lifecycle.delete(target.id.clone())?;

    if !output.is_human() {
        let kind = if removed.is_some() { "deleted" } else { "unchanged" };
        output.json(&json!({
            "type": kind,
            "id": target.id,
            "item": removed
        }));
    }

    Ok(())
}
