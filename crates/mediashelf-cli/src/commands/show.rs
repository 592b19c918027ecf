use super::{header_cell, new_table, resolve_item, AppContext};
use color_eyre::Result;
use comfy_table::Cell;
use media_shelf_core::CollectionStore;
use media_shelf_models::MediaItem;
use serde_json::json;

pub async fn run_show(ctx: &AppContext, id: &str) -> Result<()> {
    let output = &ctx.output;
    let items = ctx.open_store().read()?;
    let item = resolve_item(&items, id)?;

    if output.is_human() {
        output.println(render_item(&item).to_string());
    } else {
        output.json(&json!(item));
    }

    Ok(())
}

fn render_item(item: &MediaItem) -> comfy_table::Table {
    let mut table = new_table();
    table.set_header(vec![header_cell(&item.title), Cell::new("")]);
    table.add_row(vec![Cell::new("Id"), Cell::new(&item.id)]);
    table.add_row(vec![Cell::new("Type"), Cell::new(item.media_type)]);
    table.add_row(vec![
        Cell::new(item.media_type.creator_label()),
        Cell::new(item.creator.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(item.rating.stars())]);
    table.add_row(vec![
        Cell::new("Added"),
        Cell::new(item.date_added.format("%Y-%m-%d %H:%M UTC")),
    ]);
    if let Some(review) = &item.review {
        table.add_row(vec![Cell::new("Review"), Cell::new(review)]);
    }
    table
}
