//! Daily income records returned by the `incomes/` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::default_active;
use super::de::{lenient_date, lenient_f64};
use super::lookup::{ProjectID, ShipID};

/// Backend-assigned income identifier.
pub type IncomeID = i64;

/// Income earned by one ship on one day, optionally against a project.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DailyIncome {
    pub id: IncomeID,

    /// The ship that earned the income.
    pub ship: ShipID,

    #[serde(default)]
    pub project: Option<ProjectID>,

    /// Day the income was earned. A time part, if sent, is dropped.
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,

    /// Price per cubic foot of sand.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sand_rate: Option<f64>,

    /// Sand delivered, in cubic feet.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sands_amount: Option<f64>,

    /// Computed amount (`sand_rate * sands_amount` when both are known).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,

    /// Amount actually received.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub actual_amount: Option<f64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request body for creating or updating a daily income.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IncomePayload {
    pub ship: ShipID,
    /// Serialized as `null` when the income is not tied to a project.
    pub project: Option<ProjectID>,
    pub date: NaiveDate,
    pub sand_rate: Option<f64>,
    pub sands_amount: Option<f64>,
    pub amount: f64,
    pub actual_amount: Option<f64>,
    pub description: String,
    pub is_active: bool,
}
