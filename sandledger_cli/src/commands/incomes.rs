use anyhow::Result;
use clap::{Args, Subcommand};
use sandledger_lib::types::{IncomeID, ProjectID, Ship, ShipID};
use sandledger_lib::validation;
use sandledger_lib::views::total_income;
use sandledger_lib::{IncomeFilter, IncomeForm, LedgerClient, ListQuery};

use crate::output::{format_money, print_incomes, OutputFormat};

#[derive(Args)]
pub struct IncomesArgs {
    #[command(subcommand)]
    pub command: IncomesCommand,
}

#[derive(Subcommand)]
pub enum IncomesCommand {
    /// List daily incomes, optionally filtered by ship and month
    List {
        /// Only incomes earned by this ship ID
        #[arg(long)]
        ship: Option<ShipID>,
        /// Only incomes in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Record a new daily income
    Add(IncomeFields),
    /// Change an existing income; omitted fields keep their stored values
    Edit {
        id: IncomeID,
        #[command(flatten)]
        fields: IncomeFields,
    },
    /// Delete an income
    Delete {
        id: IncomeID,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Default)]
pub struct IncomeFields {
    /// Ship ID (see `sandledger ships`)
    #[arg(long)]
    pub ship: Option<ShipID>,

    /// Project ID (see `sandledger projects`)
    #[arg(long, conflicts_with = "no_project")]
    pub project: Option<ProjectID>,

    /// Detach the income from its project
    #[arg(long)]
    pub no_project: bool,

    /// Date of the income (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Price per cubic foot of sand
    #[arg(long)]
    pub sand_rate: Option<String>,

    /// Sand delivered, in cubic feet
    #[arg(long)]
    pub sands_amount: Option<String>,

    /// Amount, used when rate and sand are not both given
    #[arg(long)]
    pub amount: Option<String>,

    /// Amount actually received (defaults to the computed amount)
    #[arg(long)]
    pub actual_amount: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Mark the income inactive
    #[arg(long, conflicts_with = "active")]
    pub inactive: bool,

    /// Mark the income active
    #[arg(long)]
    pub active: bool,
}

impl IncomeFields {
    fn apply_to(&self, form: &mut IncomeForm) {
        if self.ship.is_some() {
            form.ship = self.ship;
        }
        if self.no_project {
            form.project = None;
        } else if self.project.is_some() {
            form.project = self.project;
        }
        if let Some(date) = &self.date {
            form.date = date.clone();
        }
        if self.sand_rate.is_some() {
            form.sand_rate = self.sand_rate.clone();
        }
        if self.sands_amount.is_some() {
            form.sands_amount = self.sands_amount.clone();
        }
        if self.amount.is_some() {
            form.amount = self.amount.clone();
        }
        if self.actual_amount.is_some() {
            form.actual_amount = self.actual_amount.clone();
        }
        if self.description.is_some() {
            form.description = self.description.clone();
        }
        if self.inactive {
            form.is_active = false;
        } else if self.active {
            form.is_active = true;
        }
    }
}

pub async fn run(args: &IncomesArgs, client: &LedgerClient, format: OutputFormat) -> Result<()> {
    match &args.command {
        IncomesCommand::List { ship, month } => list(client, *ship, month.as_deref(), format).await,
        IncomesCommand::Add(fields) => {
            let mut form = IncomeForm::default();
            fields.apply_to(&mut form);
            let created = client.create_income(&form.to_payload()?).await?;
            eprintln!("Created income {}", created.id);
            let ships = ships_for_display(client).await;
            print_incomes(&[&created], &ships, format)
        }
        IncomesCommand::Edit { id, fields } => {
            let existing = client.get_income(*id).await?;
            let mut form = IncomeForm::from_income(&existing);
            // The stored actual amount would otherwise survive a rate or sand change.
            if fields.actual_amount.is_none()
                && (fields.sand_rate.is_some() || fields.sands_amount.is_some())
                && existing.actual_amount == existing.amount
            {
                form.actual_amount = None;
            }
            fields.apply_to(&mut form);
            let updated = client.update_income(*id, &form.to_payload()?).await?;
            eprintln!("Updated income {}", updated.id);
            let ships = ships_for_display(client).await;
            print_incomes(&[&updated], &ships, format)
        }
        IncomesCommand::Delete { id, yes } => {
            if !*yes && !super::confirm(&format!("Delete income {}?", id))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            client.delete_income(*id).await?;
            eprintln!("Deleted income {}", id);
            Ok(())
        }
    }
}

async fn list(
    client: &LedgerClient,
    ship: Option<ShipID>,
    month: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut filter = IncomeFilter::new();
    if let Some(ship) = ship {
        filter = filter.with_ship(ship);
    }
    if let Some(month) = month {
        filter = filter.with_month(validation::validate_month(month)?);
    }

    let query = ListQuery::default();
    let (incomes, ships) =
        tokio::try_join!(client.list_incomes(&query), client.list_ships())?;
    let kept = filter.apply(&incomes);
    print_incomes(&kept, &ships, format)?;

    eprintln!(
        "{} of {} incomes, total {}",
        kept.len(),
        incomes.len(),
        format_money(total_income(&kept))
    );
    Ok(())
}

/// Ship names for rendering a record that is already written. A failed
/// lookup only costs the names, which then show as "N/A".
async fn ships_for_display(client: &LedgerClient) -> Vec<Ship> {
    match client.list_ships().await {
        Ok(ships) => ships,
        Err(e) => {
            tracing::warn!("could not load ship names: {}", e);
            Vec::new()
        }
    }
}
