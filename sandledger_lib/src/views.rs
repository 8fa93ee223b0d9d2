//! Aggregates and filters for list views.
//!
//! All functions work on already-fetched collections and never touch the
//! network.

use sandledger_api::types::{number_from_value, Asset, DailyIncome, Ship, ShipID};
use serde_json::Value;

/// Shown in place of a ship name when the id is not in the lookup list.
pub const UNKNOWN_SHIP: &str = "N/A";

/// Sums `total_amount` across assets. Missing amounts count as zero.
pub fn total_asset_value(assets: &[Asset]) -> f64 {
    assets.iter().map(|a| a.total_amount.unwrap_or(0.0)).sum()
}

/// [`total_asset_value`] over undecoded records, for callers holding raw JSON.
pub fn total_asset_value_of(records: &[Value]) -> f64 {
    records
        .iter()
        .filter_map(|r| r.get("total_amount").and_then(number_from_value))
        .sum()
}

/// Sums `amount` across incomes. Missing amounts count as zero.
pub fn total_income(incomes: &[&DailyIncome]) -> f64 {
    incomes.iter().map(|i| i.amount.unwrap_or(0.0)).sum()
}

/// Looks up a ship's display name.
pub fn ship_name(ships: &[Ship], id: ShipID) -> &str {
    ships
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.as_str())
        .unwrap_or(UNKNOWN_SHIP)
}

/// Client-side filter for the income list. Unset criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncomeFilter {
    pub ship: Option<ShipID>,
    /// Date prefix, normally `YYYY-MM`.
    pub month: Option<String>,
}

impl IncomeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ship(mut self, ship: ShipID) -> Self {
        self.ship = Some(ship);
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ship.is_none() && self.month.as_deref().map_or(true, str::is_empty)
    }

    pub fn matches(&self, income: &DailyIncome) -> bool {
        if let Some(ship) = self.ship {
            if income.ship != ship {
                return false;
            }
        }
        if let Some(month) = self.month.as_deref().filter(|m| !m.is_empty()) {
            if !income.date.format("%Y-%m-%d").to_string().starts_with(month) {
                return false;
            }
        }
        true
    }

    /// Keeps matching incomes, in their original order.
    pub fn apply<'a>(&self, incomes: &'a [DailyIncome]) -> Vec<&'a DailyIncome> {
        incomes.iter().filter(|i| self.matches(i)).collect()
    }
}
