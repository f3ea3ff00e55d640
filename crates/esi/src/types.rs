//! Typed views over ESI response documents.
//!
//! Only the fields the tool consumes are modeled; the full document is
//! cached verbatim, so adding fields later costs nothing.

use serde::{Deserialize, Serialize};

/// Public character information (`/characters/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub corporation_id: Option<u64>,
    #[serde(default)]
    pub alliance_id: Option<u64>,
    #[serde(default)]
    pub security_status: Option<f64>,
}

/// Public corporation information (`/corporations/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corporation {
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}
