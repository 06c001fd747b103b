//! Soil type browsing routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::SoilRecord;
use crate::routes::Nav;
use crate::search::{CatalogQuery, filter_soils};
use crate::state::AppState;

/// Soil listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "soils/list.html")]
pub struct SoilListTemplate {
    pub nav: Nav,
    pub soils: Vec<SoilRecord>,
    pub search: String,
    pub crop: String,
    pub error: Option<String>,
}

/// Display the soil listing with search and crop filters applied.
///
/// A store failure renders the page with an error banner rather than a
/// bare 500; an empty collection renders the empty-state message instead.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let (soils, error) = match state.records().fetch_all::<SoilRecord>().await {
        Ok(soils) => (filter_soils(&soils, &query), None),
        Err(e) => {
            tracing::error!("Failed to fetch soil records: {}", e);
            (
                Vec::new(),
                Some("Failed to load soil types, please try again later.".to_owned()),
            )
        }
    };

    SoilListTemplate {
        nav: Nav::for_user(&user),
        soils,
        search: query.search,
        crop: query.crop,
        error,
    }
}
