//! Distributor record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_core::DistributorId;

use crate::records::Record;

/// A seed/crop distributor record as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorRecord {
    /// Store-assigned id.
    pub id: DistributorId,
    /// Distributor name.
    #[serde(default)]
    pub name: String,
    /// Location, e.g. a city or region.
    #[serde(default)]
    pub location: String,
    /// Free-text contact information.
    #[serde(default)]
    pub contact_info: String,
    /// Crop types handled, from the comma-separated form input.
    #[serde(default, deserialize_with = "super::lenient_string_list")]
    pub crop_types: Vec<String>,
    /// Seed varieties available.
    #[serde(default, deserialize_with = "super::lenient_string_list")]
    pub seeds_available: Vec<String>,
    /// Stamped by the record service on add.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Stamped by the record service on add and every update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields submitted by the distributor management form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorInput {
    /// Distributor name (required).
    pub name: String,
    /// Location (required).
    pub location: String,
    /// Free-text contact information.
    pub contact_info: String,
    /// Split from the comma-separated input, each element trimmed.
    pub crop_types: Vec<String>,
    /// Split from the comma-separated input, each element trimmed.
    pub seeds_available: Vec<String>,
}

impl Record for DistributorRecord {
    const COLLECTION: &'static str = crate::store::collections::DISTRIBUTORS;
    type Input = DistributorInput;
}
