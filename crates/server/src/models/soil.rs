//! Soil record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_core::SoilId;

use crate::records::Record;

/// A soil type record as read back from the store.
///
/// Field names mirror the stored document (`soilType`, `pH`, ...). Scalar
/// fields default when a legacy document omits them; `suitableCrops` is
/// coerced to an empty sequence if it is missing or not an array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilRecord {
    /// Store-assigned id.
    pub id: SoilId,
    /// Soil type name, e.g. "Loam".
    #[serde(default)]
    pub soil_type: String,
    /// pH value, domain 0-14.
    #[serde(rename = "pH", default)]
    pub ph: f64,
    /// Free-text nutrient description.
    #[serde(default)]
    pub nutrients: String,
    /// Crops this soil suits, from the comma-separated form input.
    #[serde(default, deserialize_with = "super::lenient_string_list")]
    pub suitable_crops: Vec<String>,
    /// Free-text characteristics.
    #[serde(default)]
    pub characteristics: String,
    /// Stamped by the record service on add.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Stamped by the record service on add and every update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields submitted by the soil management form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilInput {
    /// Soil type name (required).
    pub soil_type: String,
    /// pH value, validated to 0-14 by the form route.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Free-text nutrient description.
    pub nutrients: String,
    /// Split from the comma-separated input, each element trimmed.
    pub suitable_crops: Vec<String>,
    /// Free-text characteristics.
    pub characteristics: String,
}

impl Record for SoilRecord {
    const COLLECTION: &'static str = crate::store::collections::SOILS;
    type Input = SoilInput;
}
