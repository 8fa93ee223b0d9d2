use anyhow::Result;
use clap::{Args, Subcommand};
use sandledger_lib::types::AssetID;
use sandledger_lib::views::total_asset_value;
use sandledger_lib::{AssetForm, LedgerClient};

use crate::output::{format_money, print_assets, OutputFormat};

#[derive(Args)]
pub struct AssetsArgs {
    #[command(subcommand)]
    pub command: AssetsCommand,
}

#[derive(Subcommand)]
pub enum AssetsCommand {
    /// List all assets with their total value
    List,
    /// Record a new asset
    Add(AssetFields),
    /// Change an existing asset; omitted fields keep their stored values
    Edit {
        id: AssetID,
        #[command(flatten)]
        fields: AssetFields,
    },
    /// Delete an asset
    Delete {
        id: AssetID,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Default)]
pub struct AssetFields {
    /// Asset name (e.g. "Cutter suction dredger")
    #[arg(long)]
    pub item: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Number of units
    #[arg(long)]
    pub quantity: Option<String>,

    /// Purchase rate per unit
    #[arg(long)]
    pub rate: Option<String>,

    /// Mark the asset inactive
    #[arg(long, conflicts_with = "active")]
    pub inactive: bool,

    /// Mark the asset active
    #[arg(long)]
    pub active: bool,
}

impl AssetFields {
    fn apply_to(&self, form: &mut AssetForm) {
        if let Some(item) = &self.item {
            form.item = item.clone();
        }
        if let Some(description) = &self.description {
            form.description = Some(description.clone());
        }
        if let Some(quantity) = &self.quantity {
            form.quantity = quantity.clone();
        }
        if let Some(rate) = &self.rate {
            form.rate = rate.clone();
        }
        if self.inactive {
            form.is_active = false;
        } else if self.active {
            form.is_active = true;
        }
    }
}

pub async fn run(args: &AssetsArgs, client: &LedgerClient, format: OutputFormat) -> Result<()> {
    match &args.command {
        AssetsCommand::List => list(client, format).await,
        AssetsCommand::Add(fields) => {
            let mut form = AssetForm::default();
            fields.apply_to(&mut form);
            let created = client.create_asset(&form.to_payload()?).await?;
            eprintln!("Created asset {}", created.id);
            print_assets(&[created], format)
        }
        AssetsCommand::Edit { id, fields } => {
            let existing = client.get_asset(*id).await?;
            let mut form = AssetForm::from_asset(&existing);
            fields.apply_to(&mut form);
            let updated = client.update_asset(*id, &form.to_payload()?).await?;
            eprintln!("Updated asset {}", updated.id);
            print_assets(&[updated], format)
        }
        AssetsCommand::Delete { id, yes } => {
            if !*yes && !super::confirm(&format!("Delete asset {}?", id))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            client.delete_asset(*id).await?;
            eprintln!("Deleted asset {}", id);
            Ok(())
        }
    }
}

async fn list(client: &LedgerClient, format: OutputFormat) -> Result<()> {
    let assets = client.list_assets().await?;
    print_assets(&assets, format)?;

    let summary = format!("Total Asset Value: {}", format_money(total_asset_value(&assets)));
    match format {
        OutputFormat::Table | OutputFormat::Markdown => println!("{}", summary),
        OutputFormat::Json | OutputFormat::Csv => eprintln!("{}", summary),
    }
    Ok(())
}
