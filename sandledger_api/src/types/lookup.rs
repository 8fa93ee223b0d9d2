//! Lookup collections referenced by income records.

use serde::{Deserialize, Serialize};

pub type ShipID = i64;
pub type ProjectID = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ship {
    pub id: ShipID,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Project {
    pub id: ProjectID,
    pub name: String,
}
