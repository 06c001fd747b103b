//! Client-side filtering over in-memory snapshots.
//!
//! The list views fetch a full collection snapshot and filter it here, in
//! process. Matching is case-insensitive substring containment; an empty
//! term is the identity filter for its clause. Filtering is pure and
//! order-preserving, so running it twice with the same query yields the
//! same result.

use serde::Deserialize;

use crate::models::{DistributorRecord, SoilRecord};

/// Free-text search plus tag filter, as submitted by the list views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free-text term matched against name/type/location fields.
    #[serde(default)]
    pub search: String,
    /// Tag term matched against crop/seed lists.
    #[serde(default)]
    pub crop: String,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_tag_matches(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|tag| contains_ci(tag, needle))
}

/// Whether a soil record matches the query.
///
/// The search term is matched against `soilType` and `characteristics`; the
/// crop term against `suitableCrops`. Empty terms match everything.
#[must_use]
pub fn soil_matches(soil: &SoilRecord, query: &CatalogQuery) -> bool {
    let matches_search = contains_ci(&soil.soil_type, &query.search)
        || contains_ci(&soil.characteristics, &query.search);

    let matches_crop =
        query.crop.is_empty() || any_tag_matches(&soil.suitable_crops, &query.crop);

    matches_search && matches_crop
}

/// Whether a distributor record matches the query.
///
/// The search term is matched against `name` and `location`; the crop term
/// against both `cropTypes` and `seedsAvailable`.
#[must_use]
pub fn distributor_matches(distributor: &DistributorRecord, query: &CatalogQuery) -> bool {
    let matches_search = contains_ci(&distributor.name, &query.search)
        || contains_ci(&distributor.location, &query.search);

    let matches_crop = query.crop.is_empty()
        || any_tag_matches(&distributor.crop_types, &query.crop)
        || any_tag_matches(&distributor.seeds_available, &query.crop);

    matches_search && matches_crop
}

/// Filter a soil snapshot, preserving snapshot order.
#[must_use]
pub fn filter_soils(soils: &[SoilRecord], query: &CatalogQuery) -> Vec<SoilRecord> {
    soils
        .iter()
        .filter(|soil| soil_matches(soil, query))
        .cloned()
        .collect()
}

/// Filter a distributor snapshot, preserving snapshot order.
#[must_use]
pub fn filter_distributors(
    distributors: &[DistributorRecord],
    query: &CatalogQuery,
) -> Vec<DistributorRecord> {
    distributors
        .iter()
        .filter(|distributor| distributor_matches(distributor, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrilink_core::{DistributorId, SoilId};

    fn soil(id: &str, soil_type: &str, characteristics: &str, crops: &[&str]) -> SoilRecord {
        SoilRecord {
            id: SoilId::new(id),
            soil_type: soil_type.to_owned(),
            ph: 7.0,
            nutrients: String::new(),
            suitable_crops: crops.iter().map(|c| (*c).to_owned()).collect(),
            characteristics: characteristics.to_owned(),
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_soils() -> Vec<SoilRecord> {
        vec![
            soil("1", "Loam", "Well drained", &["Wheat", "Maize"]),
            soil("2", "Clay", "Heavy and dense", &["Rice"]),
        ]
    }

    fn distributor(id: &str, name: &str, location: &str, crops: &[&str], seeds: &[&str]) -> DistributorRecord {
        DistributorRecord {
            id: DistributorId::new(id),
            name: name.to_owned(),
            location: location.to_owned(),
            contact_info: String::new(),
            crop_types: crops.iter().map(|c| (*c).to_owned()).collect(),
            seeds_available: seeds.iter().map(|s| (*s).to_owned()).collect(),
            created_at: None,
            updated_at: None,
        }
    }

    fn query(search: &str, crop: &str) -> CatalogQuery {
        CatalogQuery {
            search: search.to_owned(),
            crop: crop.to_owned(),
        }
    }

    #[test]
    fn test_empty_query_returns_full_snapshot_in_order() {
        let soils = sample_soils();
        let filtered = filter_soils(&soils, &CatalogQuery::default());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id.as_str(), "1");
        assert_eq!(filtered[1].id.as_str(), "2");
    }

    #[test]
    fn test_crop_filter_case_insensitive_substring() {
        // "whea" matches "Wheat" on the Loam record only.
        let filtered = filter_soils(&sample_soils(), &query("", "whea"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].soil_type, "Loam");
    }

    #[test]
    fn test_search_matches_type_or_characteristics() {
        let filtered = filter_soils(&sample_soils(), &query("DENSE", ""));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].soil_type, "Clay");

        let filtered = filter_soils(&sample_soils(), &query("loam", ""));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].soil_type, "Loam");
    }

    #[test]
    fn test_both_clauses_must_match() {
        // Search matches Loam, crop matches only Clay's Rice: nothing passes.
        let filtered = filter_soils(&sample_soils(), &query("Loam", "rice"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let q = query("a", "e");
        let once = filter_soils(&sample_soils(), &q);
        let twice = filter_soils(&once, &q);
        assert_eq!(
            once.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            twice.iter().map(|s| s.id.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_crop_list_matches_only_identity_filter() {
        let soils = vec![soil("1", "Silt", "Fine", &[])];
        assert_eq!(filter_soils(&soils, &query("", "")).len(), 1);
        assert!(filter_soils(&soils, &query("", "wheat")).is_empty());
    }

    #[test]
    fn test_distributor_crop_filter_spans_both_lists() {
        let distributors = vec![
            distributor("1", "GreenGrow", "Nairobi", &["Wheat"], &[]),
            distributor("2", "SeedWorks", "Kisumu", &[], &["Hybrid Maize"]),
            distributor("3", "AgroPlus", "Eldoret", &["Rice"], &["Rice Seed"]),
        ];

        let filtered = filter_distributors(&distributors, &query("", "maize"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "SeedWorks");

        let filtered = filter_distributors(&distributors, &query("", "rice"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "AgroPlus");
    }

    #[test]
    fn test_distributor_search_matches_name_or_location() {
        let distributors = vec![
            distributor("1", "GreenGrow", "Nairobi", &[], &[]),
            distributor("2", "SeedWorks", "Kisumu", &[], &[]),
        ];
        let filtered = filter_distributors(&distributors, &query("nairobi", ""));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "GreenGrow");
    }
}
