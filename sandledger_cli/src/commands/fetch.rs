use anyhow::{anyhow, Result};
use clap::Args;
use sandledger_lib::{LedgerClient, ListQuery};

use crate::output::print_json;

#[derive(Args)]
pub struct FetchArgs {
    /// Collection path relative to the base URL (e.g. "incomes/")
    pub endpoint: String,

    /// Query parameter for the first page, as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// Follows every page of `endpoint` and prints the combined records as JSON.
pub async fn run(args: &FetchArgs, client: &LedgerClient) -> Result<()> {
    let query: ListQuery = args.params.iter().cloned().collect();
    let records = client.fetch_raw(&args.endpoint, &query).await?;
    eprintln!("{} records from {}", records.len(), args.endpoint);
    print_json(&records);
    Ok(())
}

fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("parameter name is empty in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
