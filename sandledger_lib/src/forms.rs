//! Form state for creating and editing records.
//!
//! Forms hold raw user input as strings and turn it into typed request bodies,
//! filling in derived totals along the way.

use sandledger_api::types::{
    Asset, AssetPayload, DailyIncome, IncomePayload, ProjectID, ShipID,
};

use crate::error::LedgerError;
use crate::validation::{
    derive_total, parse_number, parse_optional_number, sanitize_description, sanitize_text,
    validate_amount, validate_date, validate_non_negative, MAX_ITEM_LENGTH,
};

/// Raw input for an asset.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetForm {
    pub item: String,
    pub description: Option<String>,
    pub quantity: String,
    pub rate: String,
    pub is_active: bool,
}

impl Default for AssetForm {
    fn default() -> Self {
        Self {
            item: String::new(),
            description: None,
            quantity: String::new(),
            rate: String::new(),
            is_active: true,
        }
    }
}

impl AssetForm {
    /// Prefills the form from a stored asset, for editing.
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            item: asset.item.clone(),
            description: asset.description.clone(),
            quantity: asset.quantity.map(format_number).unwrap_or_default(),
            rate: asset.rate.map(format_number).unwrap_or_default(),
            is_active: asset.is_active,
        }
    }

    /// The total as it would be submitted, or `None` while quantity or rate
    /// is not yet a number.
    pub fn total_amount(&self) -> Option<f64> {
        let quantity = parse_number("quantity", &self.quantity).ok()?;
        let rate = parse_number("rate", &self.rate).ok()?;
        Some(derive_total(quantity, rate))
    }

    pub fn to_payload(&self) -> Result<AssetPayload, LedgerError> {
        let item = sanitize_text(&self.item, MAX_ITEM_LENGTH)
            .map_err(|e| LedgerError::InvalidInput(format!("item: {}", detail(e))))?;
        let quantity = validate_non_negative("quantity", parse_number("quantity", &self.quantity)?)?;
        let rate = validate_non_negative("rate", parse_number("rate", &self.rate)?)?;

        Ok(AssetPayload {
            item,
            description: sanitize_description(self.description.as_deref())?,
            quantity,
            rate,
            total_amount: derive_total(quantity, rate),
            is_active: self.is_active,
        })
    }
}

/// Raw input for a daily income.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomeForm {
    pub ship: Option<ShipID>,
    pub project: Option<ProjectID>,
    pub date: String,
    pub sand_rate: Option<String>,
    pub sands_amount: Option<String>,
    /// Only consulted when the amount cannot be derived from rate and quantity.
    pub amount: Option<String>,
    /// Defaults to the derived amount when left empty.
    pub actual_amount: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Default for IncomeForm {
    fn default() -> Self {
        Self {
            ship: None,
            project: None,
            date: String::new(),
            sand_rate: None,
            sands_amount: None,
            amount: None,
            actual_amount: None,
            description: None,
            is_active: true,
        }
    }
}

impl IncomeForm {
    /// Prefills the form from a stored income, for editing.
    pub fn from_income(income: &DailyIncome) -> Self {
        Self {
            ship: Some(income.ship),
            project: income.project,
            date: income.date.format("%Y-%m-%d").to_string(),
            sand_rate: income.sand_rate.map(format_number),
            sands_amount: income.sands_amount.map(format_number),
            amount: income.amount.map(format_number),
            actual_amount: income.actual_amount.map(format_number),
            description: income.description.clone(),
            is_active: income.is_active,
        }
    }

    /// `sand_rate * sands_amount` when both parse.
    pub fn derived_amount(&self) -> Option<f64> {
        let rate = parse_optional_number("sand_rate", self.sand_rate.as_deref()).ok()??;
        let quantity = parse_optional_number("sands_amount", self.sands_amount.as_deref()).ok()??;
        Some(derive_total(rate, quantity))
    }

    pub fn to_payload(&self) -> Result<IncomePayload, LedgerError> {
        let ship = self
            .ship
            .ok_or_else(|| LedgerError::InvalidInput("ship is required".to_string()))?;
        let date = validate_date(&self.date)?;

        let sand_rate = parse_optional_number("sand_rate", self.sand_rate.as_deref())?;
        let sands_amount = parse_optional_number("sands_amount", self.sands_amount.as_deref())?;
        let derived = match (sand_rate, sands_amount) {
            (Some(rate), Some(quantity)) => Some(derive_total(rate, quantity)),
            _ => None,
        };

        let entered = parse_optional_number("amount", self.amount.as_deref())?;
        let amount = validate_amount(derived.or(entered))?;

        let actual_amount = match parse_optional_number("actual_amount", self.actual_amount.as_deref())? {
            Some(actual) => Some(validate_non_negative("actual_amount", actual)?),
            None => derived,
        };

        Ok(IncomePayload {
            ship,
            project: self.project,
            date,
            sand_rate,
            sands_amount,
            amount,
            actual_amount,
            description: sanitize_description(self.description.as_deref())?,
            is_active: self.is_active,
        })
    }
}

fn format_number(value: f64) -> String {
    value.to_string()
}

fn detail(err: LedgerError) -> String {
    match err {
        LedgerError::InvalidInput(msg) => msg,
        other => other.to_string(),
    }
}
