mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sandledger_lib::config::BASE_URL_VAR;
use sandledger_lib::{LedgerClient, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sandledger")]
#[command(about = "Manage assets and daily sand incomes in a SandLedger backend")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL (overrides SANDLEDGER_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds (overrides SANDLEDGER_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Stop listing after this many pages (overrides SANDLEDGER_MAX_PAGES)
    #[arg(long, global = true)]
    max_pages: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, add, edit, or delete assets
    Assets(commands::assets::AssetsArgs),
    /// List, add, edit, or delete daily incomes
    Incomes(commands::incomes::IncomesArgs),
    /// List ships
    Ships,
    /// List projects
    Projects,
    /// Fetch every page of a collection as raw JSON
    Fetch(commands::fetch::FetchArgs),
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.base_url {
            Some(base_url) => Settings::from_lookup(|key: &str| {
                if key == BASE_URL_VAR {
                    Some(base_url.clone())
                } else {
                    std::env::var(key).ok()
                }
            })?,
            None => Settings::from_env()?,
        };
        if let Some(ms) = self.timeout_ms {
            settings.timeout = Duration::from_millis(ms);
        }
        if self.max_pages.is_some() {
            settings.max_pages = self.max_pages;
        }
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sandledger=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;

    let settings = cli.settings()?;
    let client = LedgerClient::new(&settings)?;

    match &cli.command {
        Commands::Assets(args) => commands::assets::run(args, &client, format).await?,
        Commands::Incomes(args) => commands::incomes::run(args, &client, format).await?,
        Commands::Ships => commands::lookups::run_ships(&client, format).await?,
        Commands::Projects => commands::lookups::run_projects(&client, format).await?,
        Commands::Fetch(args) => commands::fetch::run(args, &client).await?,
    }

    Ok(())
}
