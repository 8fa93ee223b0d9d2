//! Asset records returned by the `assets/` endpoint.

use serde::{Deserialize, Serialize};

use super::de::lenient_f64;

/// Backend-assigned asset identifier.
pub type AssetID = i64;

/// An asset owned by the business (equipment, vessels, machinery).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Asset {
    pub id: AssetID,

    /// Short name of the asset.
    pub item: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,

    /// Purchase rate per unit.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate: Option<f64>,

    /// `quantity * rate`, as stored by the backend.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request body for creating or updating an asset.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AssetPayload {
    pub item: String,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub total_amount: f64,
    pub is_active: bool,
}

pub(super) fn default_active() -> bool {
    true
}
