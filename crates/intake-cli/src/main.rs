use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intake_application::IntakeApp;
use intake_infrastructure::ConfigService;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::StepArg;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Intake CLI - guided persona research sessions", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sessions, most recent first
    List,
    /// Create a new session
    New {
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a session's collected data
    Show { id: String },
    /// Show the step a session would reopen on
    Resume { id: String },
    /// Delete a session
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Generate an option batch for round 1 or 2 and print the draft
    Generate {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        round: u8,
        /// Comma-separated keywords
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
    /// Generate concept images for round 3 and print them
    Concepts {
        id: String,
        #[arg(long)]
        style: String,
        /// Reference image file
        #[arg(long)]
        reference: Option<PathBuf>,
    },
    /// Complete a step with a JSON payload
    Apply {
        id: String,
        #[arg(long, value_enum)]
        step: StepArg,
        #[arg(long)]
        file: PathBuf,
    },
    /// Generate the AI summary of a completed session
    Summarize {
        id: String,
        /// Replace an existing summary
        #[arg(long)]
        force: bool,
    },
    /// Export a completed session as Markdown
    Export {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake=info,summary_job=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to resolve the config directory")?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    tracing::debug!("Using config {}", config_service.path().display());
    let app = IntakeApp::bootstrap(config)
        .await
        .context("Failed to start intake")?;

    match cli.command {
        Commands::List => commands::session::list(&app).await?,
        Commands::New { name } => commands::session::create(&app, name).await?,
        Commands::Show { id } => commands::session::show(&app, &id).await?,
        Commands::Resume { id } => commands::session::resume(&app, &id).await?,
        Commands::Delete { id, yes } => commands::session::delete(&app, &id, yes).await?,
        Commands::Generate {
            id,
            round,
            keywords,
        } => commands::wizard::generate(&app, &id, round, keywords).await?,
        Commands::Concepts {
            id,
            style,
            reference,
        } => commands::wizard::concepts(&app, &id, &style, reference).await?,
        Commands::Apply { id, step, file } => commands::wizard::apply(&app, &id, step, &file).await?,
        Commands::Summarize { id, force } => commands::wizard::summarize(&app, &id, force).await?,
        Commands::Export { id, out } => commands::wizard::export(&app, &id, out).await?,
    }

    app.store().shutdown();
    Ok(())
}
