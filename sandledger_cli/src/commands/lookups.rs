use anyhow::Result;
use sandledger_lib::LedgerClient;

use crate::output::{print_projects, print_ships, OutputFormat};

pub async fn run_ships(client: &LedgerClient, format: OutputFormat) -> Result<()> {
    let ships = client.list_ships().await?;
    print_ships(&ships, format)
}

pub async fn run_projects(client: &LedgerClient, format: OutputFormat) -> Result<()> {
    let projects = client.list_projects().await?;
    print_projects(&projects, format)
}
