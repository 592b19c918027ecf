use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::{add, clear, config, edit, exchange, list, remove, show, stats, AppContext};
use media_shelf_config::{Config, PathManager};
use media_shelf_core::ExchangeFormat;
use media_shelf_models::{MediaType, Rating, SortMode, TypeFilter};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "mediashelf")]
#[command(about = "MediaShelf - Keep track of the movies, books and podcasts you've reviewed")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a review
    #[command(long_about = "Add a review to the library. Missing required fields are prompted for when running in a terminal.")]
    Add {
        /// Media type: movie, book or podcast
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,

        /// Title of the movie, book or podcast
        #[arg(long)]
        title: Option<String>,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: Option<Rating>,

        /// Director, author or host
        #[arg(long)]
        creator: Option<String>,

        /// Free-form review text
        #[arg(long)]
        review: Option<String>,
    },
    /// Edit an existing review
    #[command(long_about = "Edit a review. Only the given fields change; everything else keeps its current value. The id can be abbreviated to any unique prefix.")]
    Edit {
        /// Review id or unique id prefix
        id: String,

        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        rating: Option<Rating>,

        #[arg(long, conflicts_with = "clear_creator")]
        creator: Option<String>,

        /// Remove the creator
        #[arg(long, action = ArgAction::SetTrue)]
        clear_creator: bool,

        #[arg(long, conflicts_with = "clear_review")]
        review: Option<String>,

        /// Remove the review text
        #[arg(long, action = ArgAction::SetTrue)]
        clear_review: bool,
    },
    /// Remove a review
    Remove {
        /// Review id or unique id prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Show a single review
    Show {
        /// Review id or unique id prefix
        id: String,
    },
    /// List reviews
    #[command(long_about = "List reviews, optionally filtered by a case-insensitive search over title and creator and by media type. Defaults come from the [display] section of the config file.")]
    List {
        /// Search text matched against title and creator
        #[arg(short, long)]
        search: Option<String>,

        /// Type filter: all, movie, book or podcast
        #[arg(long = "type", value_name = "TYPE")]
        type_filter: Option<TypeFilter>,

        /// Sort order: recent, rating or title
        #[arg(long)]
        sort: Option<SortMode>,
    },
    /// Show library statistics
    Stats {
        /// Number of recent reviews to show
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },
    /// Export the library to a JSON or CSV file
    Export {
        path: PathBuf,

        /// File format (defaults to the file extension)
        #[arg(long)]
        format: Option<ExchangeFormat>,
    },
    /// Import reviews from a JSON or CSV file
    #[command(long_about = "Import reviews from a JSON or CSV file. Every imported row becomes a new review with a fresh id and timestamp. Rows with an invalid type, title or rating are skipped and reported.")]
    Import {
        path: PathBuf,

        /// File format (defaults to the file extension)
        #[arg(long)]
        format: Option<ExchangeFormat>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Delete every stored review
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration and resolved paths
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = Config::load_or_default(&config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config {}: {}", config_path.display(), e))?;

    // Initialize logging with verbose level
    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext::new(paths, config, config_path, output);

    match cli.command {
        Commands::Add {
            media_type,
            title,
            rating,
            creator,
            review,
        } => add::run_add(&ctx, media_type, title, rating, creator, review).await,
        Commands::Edit {
            id,
            media_type,
            title,
            rating,
            creator,
            clear_creator,
            review,
            clear_review,
        } => {
            let changes = edit::EditChanges {
                media_type,
                title,
                rating,
                creator: edit::FieldChange::from_flags(creator, clear_creator),
                review: edit::FieldChange::from_flags(review, clear_review),
            };
            edit::run_edit(&ctx, &id, changes).await
        }
        Commands::Remove { id, yes } => remove::run_remove(&ctx, &id, yes).await,
        Commands::Show { id } => show::run_show(&ctx, &id).await,
        Commands::List {
            search,
            type_filter,
            sort,
        } => list::run_list(&ctx, search, type_filter, sort).await,
        Commands::Stats { recent } => stats::run_stats(&ctx, recent).await,
        Commands::Export { path, format } => exchange::run_export(&ctx, &path, format)
            .await
            .wrap_err("Export failed"),
        Commands::Import { path, format } => exchange::run_import(&ctx, &path, format)
            .await
            .wrap_err("Import failed"),
        Commands::Config { cmd } => config::run_config(&ctx, cmd).await,
        Commands::Clear { yes } => clear::run_clear(&ctx, yes).await,
    }
}
