//! Seed the catalog with sample records.
//!
//! Intended for local development and demos: inserts a handful of soil
//! types and distributors so the list views have something to show.
//! Running it twice inserts the records twice; it does not deduplicate.

use std::sync::Arc;

use agrilink_server::models::{DistributorInput, DistributorRecord, SoilInput, SoilRecord};
use agrilink_server::records::RecordService;
use agrilink_server::store::{PgStore, create_pool};

use super::{CliError, database_url};

fn sample_soils() -> Vec<SoilInput> {
    vec![
        SoilInput {
            soil_type: "Loam".to_owned(),
            ph: 6.5,
            nutrients: "Balanced nitrogen, phosphorus, and potassium".to_owned(),
            suitable_crops: vec!["Wheat".to_owned(), "Maize".to_owned(), "Beans".to_owned()],
            characteristics: "Well drained, easy to work, retains moisture".to_owned(),
        },
        SoilInput {
            soil_type: "Clay".to_owned(),
            ph: 7.2,
            nutrients: "Rich in potassium and magnesium".to_owned(),
            suitable_crops: vec!["Rice".to_owned(), "Cabbage".to_owned()],
            characteristics: "Heavy, dense, holds water, slow to warm".to_owned(),
        },
        SoilInput {
            soil_type: "Sandy".to_owned(),
            ph: 5.8,
            nutrients: "Low in nutrients, needs regular fertilizing".to_owned(),
            suitable_crops: vec!["Carrots".to_owned(), "Potatoes".to_owned(), "Groundnuts".to_owned()],
            characteristics: "Light, drains fast, warms quickly in spring".to_owned(),
        },
    ]
}

fn sample_distributors() -> Vec<DistributorInput> {
    vec![
        DistributorInput {
            name: "GreenGrow Supplies".to_owned(),
            location: "Nakuru".to_owned(),
            contact_info: "info@greengrow.example".to_owned(),
            crop_types: vec!["Wheat".to_owned(), "Maize".to_owned()],
            seeds_available: vec!["Hybrid Maize 614".to_owned(), "Durum Wheat".to_owned()],
        },
        DistributorInput {
            name: "Valley Seed Co.".to_owned(),
            location: "Eldoret".to_owned(),
            contact_info: "+254 700 000000".to_owned(),
            crop_types: vec!["Rice".to_owned(), "Beans".to_owned()],
            seeds_available: vec!["Basmati 370".to_owned(), "Rose Coco Beans".to_owned()],
        },
    ]
}

/// Insert the sample records.
///
/// # Errors
///
/// Returns `CliError` if the database URL is missing or any insert fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;
    let records = RecordService::new(Arc::new(PgStore::new(pool)));

    let soils = sample_soils();
    for soil in &soils {
        records.add::<SoilRecord>(soil).await?;
    }
    tracing::info!("Seeded {} soil types", soils.len());

    let distributors = sample_distributors();
    for distributor in &distributors {
        records.add::<DistributorRecord>(distributor).await?;
    }
    tracing::info!("Seeded {} distributors", distributors.len());

    Ok(())
}
