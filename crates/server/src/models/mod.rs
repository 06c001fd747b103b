//! Domain types decoded from store documents.
//!
//! Documents are schemaless, so decoding is deliberately forgiving: scalar
//! fields default when absent and list-valued fields are coerced to empty
//! sequences when missing or malformed. The coercion lives here, once, so
//! every downstream consumer can rely on list fields always being sequences.

pub mod distributor;
pub mod soil;
pub mod user;

pub use distributor::{DistributorInput, DistributorRecord};
pub use soil::{SoilInput, SoilRecord};
pub use user::{CurrentUser, Identity, SessionIdentity, UserProfile};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::Document;

/// Session keys used across middleware and routes.
pub mod session_keys {
    /// The signed-in identity (id + email) for the current session.
    pub const CURRENT_IDENTITY: &str = "current_identity";
}

/// Decode a document into a typed record, injecting the store-assigned id
/// as the `id` field.
///
/// # Errors
///
/// Returns a `serde_json` error if the document cannot be interpreted as
/// `T` even after the defensive defaults.
pub fn decode_document<T: DeserializeOwned>(doc: Document) -> Result<T, serde_json::Error> {
    let mut data = doc.data;
    data.insert("id".to_owned(), Value::String(doc.id));
    serde_json::from_value(Value::Object(data))
}

/// Deserialize a list-valued field, coercing anything that is not an array
/// of strings (missing, null, scalar, legacy shape) to an empty sequence.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document {
                id: id.to_owned(),
                data: map,
            },
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_decode_injects_id() {
        let soil: SoilRecord = decode_document(doc(
            "s-1",
            json!({
                "soilType": "Loam",
                "pH": 6.8,
                "nutrients": "Nitrogen rich",
                "suitableCrops": ["Wheat", "Maize"],
                "characteristics": "Well drained",
            }),
        ))
        .expect("decode");

        assert_eq!(soil.id.as_str(), "s-1");
        assert_eq!(soil.soil_type, "Loam");
        assert_eq!(soil.suitable_crops, vec!["Wheat", "Maize"]);
    }

    #[test]
    fn test_decode_coerces_missing_list_to_empty() {
        // Legacy document with no suitableCrops field at all.
        let soil: SoilRecord =
            decode_document(doc("s-2", json!({"soilType": "Clay"}))).expect("decode");
        assert!(soil.suitable_crops.is_empty());
        assert_eq!(soil.nutrients, "");
    }

    #[test]
    fn test_decode_coerces_non_array_list_to_empty() {
        let distributor: DistributorRecord = decode_document(doc(
            "d-1",
            json!({
                "name": "GreenGrow",
                "location": "Nairobi",
                "cropTypes": "Wheat",
                "seedsAvailable": null,
            }),
        ))
        .expect("decode");

        assert!(distributor.crop_types.is_empty());
        assert!(distributor.seeds_available.is_empty());
    }
}
