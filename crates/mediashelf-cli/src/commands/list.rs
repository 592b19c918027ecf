use super::{header_cell, new_table, AppContext};
use crate::output::short_id;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use media_shelf_config::DisplayConfig;
use media_shelf_core::{view, CatalogQuery, CollectionStore};
use media_shelf_models::{MediaItem, SortMode, TypeFilter};
use owo_colors::OwoColorize;
use serde_json::json;

/// Command-line values win; anything unset falls back to the [display] config.
fn build_query(
    search: Option<String>,
    type_filter: Option<TypeFilter>,
    sort: Option<SortMode>,
    display: &DisplayConfig,
) -> CatalogQuery {
    CatalogQuery {
        text: search.unwrap_or_default(),
        type_filter: type_filter.unwrap_or(display.default_type),
        sort: sort.unwrap_or(display.default_sort),
    }
}

pub async fn run_list(
    ctx: &AppContext,
    search: Option<String>,
    type_filter: Option<TypeFilter>,
    sort: Option<SortMode>,
) -> Result<()> {
    let output = &ctx.output;
    let query = build_query(search, type_filter, sort, &ctx.config.display);
    let items = ctx.open_store().read()?;
    let shown = view(&items, &query);

    if !output.is_human() {
        output.json(&json!({
            "query": query,
            "total": items.len(),
            "items": shown
        }));
        return Ok(());
    }

    if items.is_empty() {
        output.info("No reviews yet. Add one with 'mediashelf add'.");
        return Ok(());
    }
    if shown.is_empty() {
        output.info("No reviews match this search.");
        return Ok(());
    }

    output.println(render_items(&shown).to_string());
    output.println(format!(
        "{} of {} reviews, {} sorted by {}",
        shown.len().to_string().bold(),
        items.len(),
        query.type_filter,
        query.sort
    ));
    Ok(())
}

pub fn render_items(items: &[MediaItem]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Type"),
        header_cell("Title"),
        header_cell("Creator"),
        header_cell("Rating"),
        header_cell("Added"),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(short_id(&item.id)),
            Cell::new(item.media_type),
            Cell::new(&item.title),
            Cell::new(item.creator.as_deref().unwrap_or("")),
            Cell::new(item.rating.stars()).fg(comfy_table::Color::Yellow),
            Cell::new(item.date_added.format("%Y-%m-%d")),
        ]);
    }
    table
}
