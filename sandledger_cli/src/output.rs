use anyhow::{bail, Result};
use sandledger_lib::types::{Asset, DailyIncome, Project, Ship};
use sandledger_lib::views::ship_name;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => bail!("unknown output format '{}' (expected table, json, csv, or markdown)", other),
        }
    }
}

#[derive(Tabled, Serialize)]
struct AssetRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Item")]
    #[serde(rename = "Item")]
    item: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    #[serde(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Purchase Rate")]
    #[serde(rename = "Purchase Rate")]
    rate: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
}

#[derive(Tabled, Serialize)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Ship")]
    #[serde(rename = "Ship")]
    ship: String,
    #[tabled(rename = "Rate")]
    #[serde(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Sands_CFT")]
    #[serde(rename = "Sands_CFT")]
    sands: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Actual Amount")]
    #[serde(rename = "Actual Amount")]
    actual_amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct LookupRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

// -- Row builders --

fn build_asset_rows(assets: &[Asset]) -> Vec<AssetRow> {
    assets
        .iter()
        .map(|a| AssetRow {
            id: a.id,
            item: a.item.clone(),
            description: a.description.clone().unwrap_or_default(),
            quantity: format_number(a.quantity),
            rate: format_number(a.rate),
            total: format_money(a.total_amount.unwrap_or(0.0)),
        })
        .collect()
}

fn build_income_rows(incomes: &[&DailyIncome], ships: &[Ship]) -> Vec<IncomeRow> {
    incomes
        .iter()
        .map(|i| IncomeRow {
            id: i.id,
            date: i.date.to_string(),
            ship: ship_name(ships, i.ship).to_string(),
            rate: format_number(i.sand_rate),
            sands: format_number(i.sands_amount),
            amount: format_money(i.amount.unwrap_or(0.0)),
            actual_amount: format_money(i.actual_amount.unwrap_or(0.0)),
            status: if i.is_active { "Active" } else { "Inactive" }.to_string(),
        })
        .collect()
}

fn build_ship_rows(ships: &[Ship]) -> Vec<LookupRow> {
    ships
        .iter()
        .map(|s| LookupRow { id: s.id, name: s.name.clone() })
        .collect()
}

fn build_project_rows(projects: &[Project]) -> Vec<LookupRow> {
    projects
        .iter()
        .map(|p| LookupRow { id: p.id, name: p.name.clone() })
        .collect()
}

// -- Rendering --

fn print_rows<R>(rows: Vec<R>, format: OutputFormat) -> Result<()>
where
    R: Tabled + Serialize,
{
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

/// JSON output carries the records as the backend returned them; the other
/// formats render display rows.
pub fn print_assets(assets: &[Asset], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&assets);
            Ok(())
        }
        _ => print_rows(build_asset_rows(assets), format),
    }
}

pub fn print_incomes(incomes: &[&DailyIncome], ships: &[Ship], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&incomes);
            Ok(())
        }
        _ => print_rows(build_income_rows(incomes, ships), format),
    }
}

pub fn print_ships(ships: &[Ship], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&ships);
            Ok(())
        }
        _ => print_rows(build_ship_rows(ships), format),
    }
}

pub fn print_projects(projects: &[Project], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&projects);
            Ok(())
        }
        _ => print_rows(build_project_rows(projects), format),
    }
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn format_money(value: f64) -> String {
    format!("Tk {:.2}", value)
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
