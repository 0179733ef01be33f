//! `obscreen`: runs adapter batches against an Obscreen instance.
//!
//! ```text
//! obscreen run playlists batch.json
//! echo '{"operation": "getTypes"}' | obscreen run contents
//! obscreen search slides lobby
//! obscreen fields playlists update
//! obscreen probe
//! obscreen help slides
//! ```

mod input;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use obscreen_core::search::SearchKind;
use obscreen_core::{mapping_columns, resource_catalog, Dispatcher};
use obscreen_domain::constants::DEFAULT_RESOURCE;
use obscreen_domain::{AdapterConfig, Resource};
use obscreen_infra::{config, init_tracing, LogFormat, ObscreenClient};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "obscreen", version)]
#[command(about = "Manage Obscreen digital signage content, playlists and slides", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Configuration file (JSON or TOML); defaults to environment, then probing
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log output format: pretty or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of items against one resource
    Run {
        /// contents, contentFolders, playlists, slides or process
        #[arg(default_value = DEFAULT_RESOURCE)]
        resource: String,

        /// JSON input file; `-` or omitted reads stdin
        input: Option<PathBuf>,

        /// Emit error records instead of aborting on the first failure
        #[arg(long)]
        continue_on_fail: bool,
    },

    /// Look up playlists, contents, folders or slides by name
    Search {
        kind: String,
        query: Option<String>,
    },

    /// Show the updatable fields of an operation
    Fields { resource: String, operation: String },

    /// Check the configured credentials
    Probe,

    /// List operations, for all resources or one
    Help { resource: Option<String> },
}

fn load_config(path: Option<PathBuf>) -> Result<AdapterConfig> {
    let config = match path {
        Some(path) => config::load_from_file(Some(path))?,
        None => config::load()?,
    };
    debug!(?config, "Configuration resolved");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write output")?;
    writeln!(stdout).context("Failed to write output")?;
    Ok(())
}

#[derive(Serialize)]
struct ResourceHelp {
    resource: &'static str,
    name: &'static str,
    operations: Vec<obscreen_core::OperationInfo>,
}

fn help(resource: Option<String>) -> Result<()> {
    let resources = match resource {
        Some(tag) => vec![tag.parse::<Resource>()?],
        None => Resource::ALL.to_vec(),
    };

    let catalog: Vec<ResourceHelp> = resources
        .into_iter()
        .map(|resource| ResourceHelp {
            resource: resource.as_str(),
            name: resource.display_name(),
            operations: resource_catalog(resource),
        })
        .collect();
    print_json(&catalog)
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { resource, input, continue_on_fail } => {
            let resource: Resource = resource.parse()?;
            let config = load_config(cli.config)?;
            let items = input::read_batch(input.as_deref())?;

            let client = ObscreenClient::new(&config)?;
            let dispatcher = Dispatcher::new(Arc::new(client))
                .with_continue_on_fail(continue_on_fail || config.continue_on_fail);

            info!(resource = %resource, items = items.len(), "Running batch");
            match dispatcher.run(resource, &items).await {
                Ok(output) => print_json(&output),
                Err(err) => {
                    let mut message = err.description.clone();
                    if let Some(context) = &err.context_message {
                        message = format!("{message} {context}");
                    }
                    Err(anyhow::Error::new(err).context(message))
                }
            }
        }
        Commands::Search { kind, query } => {
            let kind: SearchKind = kind.parse()?;
            let client = ObscreenClient::new(&load_config(cli.config)?)?;
            print_json(&client.search(kind, query.as_deref()).await?)
        }
        Commands::Fields { resource, operation } => {
            print_json(&mapping_columns(resource.parse::<Resource>()?, &operation)?)
        }
        Commands::Probe => {
            let config = load_config(cli.config)?;
            let client = ObscreenClient::new(&config)?;
            let valid = client.probe_credentials().await?;
            print_json(&serde_json::json!({ "instance": client.base_url(), "valid": valid }))
        }
        Commands::Help { resource } => help(resource),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format.parse::<LogFormat>()?)?;

    run(cli).await
}
