use super::{header_cell, list::render_items, new_table, AppContext};
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment};
use media_shelf_core::{aggregate, CollectionStore};
use media_shelf_models::MediaStats;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_stats(ctx: &AppContext, recent: usize) -> Result<()> {
    let output = &ctx.output;
    let items = ctx.open_store().read()?;
    let mut stats = aggregate(&items);
    stats.recent_activity.truncate(recent);

    if !output.is_human() {
        output.json(&json!(stats));
        return Ok(());
    }

    render_stats(ctx, &stats);
    Ok(())
}

fn render_stats(ctx: &AppContext, stats: &MediaStats) {
    let output = &ctx.output;
    output.println(format!(
        "\n{} {} reviews, average rating {:.1}\n",
        "Library:".bright_cyan().bold(),
        stats.total_reviews,
        stats.average_rating
    ));

    let mut table = new_table();
    table.set_header(vec![header_cell("Type"), header_cell("Reviews"), header_cell("Average")]);
    for (media_type, type_stats) in stats.by_type.iter() {
        table.add_row(vec![
            Cell::new(media_type),
            Cell::new(type_stats.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", type_stats.average_rating)).set_alignment(CellAlignment::Right),
        ]);
    }
    output.println(table.to_string());

    if stats.recent_activity.is_empty() {
        return;
    }
    output.println(format!("\n{}", "Recent activity".bright_cyan().bold()));
    output.println(render_items(&stats.recent_activity).to_string());
}
