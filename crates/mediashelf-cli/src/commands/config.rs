use super::{header_cell, new_table, AppContext};
use crate::output::OutputFormat;
use color_eyre::Result;
use comfy_table::Cell;
use media_shelf_config::Config;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(ctx: &AppContext, cmd: crate::ConfigCommands) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(ctx).await,
        crate::ConfigCommands::Init { force } => init_config(ctx, force).await,
        crate::ConfigCommands::Path => {
            match ctx.output.format() {
                OutputFormat::Human => println!("{}", ctx.config_path.display()),
                OutputFormat::Json | OutputFormat::JsonPretty => {
                    ctx.output.json(&json!({ "path": ctx.config_path.display().to_string() }))
                }
            }
            Ok(())
        }
    }
}

async fn show_config(ctx: &AppContext) -> Result<()> {
    let output = &ctx.output;
    let config = &ctx.config;
    let library_file = ctx.library_file();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !ctx.config_path.exists() {
                output.warn(format!(
                    "Configuration file not found at: {} (using defaults)",
                    ctx.config_path.display()
                ));
                output.info("Run 'mediashelf config init' to create one.");
                println!();
            }

            println!("{}", "Configuration".bright_cyan().bold());
            let mut table = new_table();
            table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
            table.add_row(vec![Cell::new("Config file"), Cell::new(ctx.config_path.display())]);
            table.add_row(vec![Cell::new("Library file"), Cell::new(library_file.display())]);
            table.add_row(vec![
                Cell::new("storage.collection_key"),
                Cell::new(&config.storage.collection_key),
            ]);
            table.add_row(vec![Cell::new("display.default_sort"), Cell::new(config.display.default_sort)]);
            table.add_row(vec![Cell::new("display.default_type"), Cell::new(config.display.default_type)]);
            table.add_row(vec![Cell::new("logging.level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![
                Cell::new("logging.json"),
                Cell::new(match config.logging.json {
                    Some(true) => "on".to_string(),
                    Some(false) => "off".to_string(),
                    None => "auto".bright_black().to_string(),
                }),
            ]);
            table.add_row(vec![
                Cell::new("logging.file"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".bright_black().to_string()),
                ),
            ]);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "configFile": ctx.config_path.display().to_string(),
                "configFileExists": ctx.config_path.exists(),
                "libraryFile": library_file.display().to_string(),
                "config": config
            }));
        }
    }

    Ok(())
}

async fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let output = &ctx.output;
    if ctx.config_path.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            ctx.config_path.display()
        ));
        return Ok(());
    }

    Config::default()
        .save_to_file(&ctx.config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", ctx.config_path.display(), e))?;
    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create data directories: {}", e))?;

    output.success(format!("Wrote default configuration to {}", ctx.config_path.display()));
    Ok(())
}
