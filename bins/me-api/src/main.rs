//! me-api CLI
//!
//! Query the me-api portfolio backend from a terminal: profile, projects,
//! search and health.

use clap::{Parser, Subcommand, ValueEnum};
use me_api_client::{ApiError, ClientConfig, EndpointConfig, ErrorKind, MeApiClient};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

/// Command-line client for the me-api portfolio backend
#[derive(Parser)]
#[command(name = "me-api")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API base URL, e.g. https://api.example.com
    #[arg(long, global = true, env = "ME_API_BASE_URL")]
    base_url: Option<String>,

    /// API version path segment, e.g. v1
    #[arg(long, global = true, env = "ME_API_VERSION")]
    api_version: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable, colored
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the profile
    Profile,

    /// List projects
    Projects {
        /// Only projects using this skill
        #[arg(short, long, conflicts_with = "python")]
        skill: Option<String>,

        /// Only Python projects
        #[arg(long)]
        python: bool,
    },

    /// Show a single project
    Project {
        /// Project ID
        id: String,
    },

    /// Search projects, skills and profiles
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Check API health
    Health,

    /// Print the resolved client configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "me_api_client=debug,me_api=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match build_client(&cli) {
        Ok(client) => run(cli.command, &client, cli.format).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let api_error = e.downcast_ref::<ApiError>();
            if let Some(api_error) = api_error {
                eprintln!("  {}", api_error.hint().dimmed());
            }
            ExitCode::from(exit_code(api_error.map(ApiError::kind)))
        }
    }
}

async fn run(command: Commands, client: &MeApiClient, format: Format) -> anyhow::Result<()> {
    match command {
        Commands::Profile => commands::profile::run(client, format).await,
        Commands::Projects { skill, python } => {
            let skill = if python { Some("python".to_string()) } else { skill };
            commands::projects::list(client, skill.as_deref(), format).await
        }
        Commands::Project { id } => commands::projects::show(client, &id, format).await,
        Commands::Search { query } => commands::search::run(client, &query.join(" "), format).await,
        Commands::Health => commands::health::run(client, format).await,
        Commands::Config => commands::config::run(client, format),
    }
}

fn build_client(cli: &Cli) -> Result<MeApiClient, ApiError> {
    let mut config = match cli.base_url.as_deref() {
        Some(base_url) => {
            ClientConfig::new(base_url, cli.api_version.as_deref())?.with_env_overrides()
        }
        None => ClientConfig::from_env()?,
    };
    if cli.base_url.is_none() && cli.api_version.is_some() {
        config.endpoint =
            EndpointConfig::resolve(config.endpoint.base_url(), cli.api_version.as_deref())?;
    }
    let client = MeApiClient::with_config(config)?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");
    Ok(client)
}

/// Process exit code for a failure class
fn exit_code(kind: Option<ErrorKind>) -> u8 {
    match kind {
        Some(ErrorKind::Configuration) => 2,
        Some(ErrorKind::Network | ErrorKind::Cors) => 3,
        Some(ErrorKind::HttpStatus | ErrorKind::RateLimited) => 4,
        Some(ErrorKind::Parse) => 5,
        None => 1,
    }
}
