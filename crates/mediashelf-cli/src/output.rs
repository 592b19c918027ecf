use clap::ValueEnum;
use media_shelf_core::{CommandOutcome, LifecycleEvent, Notifier};
use media_shelf_models::MediaItem;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "success",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "error",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "info",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "warning",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    /// Raw text for human output (tables, blank lines). Ignored in JSON modes.
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                // Shouldn't happen, but fallback to string representation
                println!("{}", data);
            }
        }
    }
}

/// Short form of an id for display; ids are UUIDs, 8 chars is plenty to address one.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn describe(item: &MediaItem) -> String {
    format!("{} \"{}\" [{}]", item.media_type, item.title, short_id(&item.id))
}

/// Lifecycle feedback rendered as success/warning/error lines.
impl Notifier for Output {
    fn notify(&self, event: &LifecycleEvent<'_>) {
        match event {
            LifecycleEvent::Succeeded(CommandOutcome::Created(item)) => {
                self.success(format!("Added {}", describe(item)));
            }
            LifecycleEvent::Succeeded(CommandOutcome::Updated(item)) => {
                self.success(format!("Updated {}", describe(item)));
            }
            LifecycleEvent::Succeeded(CommandOutcome::Deleted(item)) => {
                self.success(format!("Removed {}", describe(item)));
            }
            LifecycleEvent::Succeeded(CommandOutcome::Unchanged { id }) => {
                self.warn(format!("No review with id '{}', nothing changed", id));
            }
            LifecycleEvent::Failed { action, error } => {
                self.error(format!("Could not {} review: {}", action, error));
            }
        }
    }
}
