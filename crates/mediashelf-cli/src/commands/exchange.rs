use super::AppContext;
use color_eyre::eyre::Context;
use color_eyre::Result;
use media_shelf_core::{export_items, parse_import, CollectionStore, ExchangeFormat, ReviewLifecycle};
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

pub async fn run_export(ctx: &AppContext, path: &Path, format: Option<ExchangeFormat>) -> Result<()> {
    let output = &ctx.output;
    let format = format.unwrap_or_else(|| ExchangeFormat::from_path(path));
    let items = ctx.open_store().read()?;

    let content = export_items(&items, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, content)
        .await
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    info!("Exported {} reviews to {} as {}", items.len(), path.display(), format);
    if output.is_human() {
        output.success(format!("Exported {} reviews to {}", items.len(), path.display()));
    } else {
        output.json(&json!({
            "type": "exported",
            "path": path.display().to_string(),
            "format": format,
            "count": items.len()
        }));
    }
    Ok(())
}

pub async fn run_import(ctx: &AppContext, path: &Path, format: Option<ExchangeFormat>) -> Result<()> {
    let output = &ctx.output;
    let format = format.unwrap_or_else(|| ExchangeFormat::from_path(path));
    let text = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let batch = parse_import(&text, format)?;
    debug!(
        "Parsed {}: {} rows accepted, {} rejected",
        path.display(),
        batch.fields.len(),
        batch.rejected.len()
    );

    let lifecycle = ReviewLifecycle::new(ctx.open_store());
    let imported = lifecycle.create_many(batch.fields)?.len();

    info!("Imported {} reviews from {}", imported, path.display());
    if output.is_human() {
        output.success(format!("Imported {} reviews from {}", imported, path.display()));
        for row in &batch.rejected {
            output.warn(format!("Skipped row {}: {}", row.position, row.reason));
        }
    } else {
        output.json(&json!({
            "type": "imported",
            "path": path.display().to_string(),
            "count": imported,
            "rejected": batch.rejected
        }));
    }
    Ok(())
}
