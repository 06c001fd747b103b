//! Distributor browsing routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::DistributorRecord;
use crate::routes::Nav;
use crate::search::{CatalogQuery, filter_distributors};
use crate::state::AppState;

/// Distributor listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "distributors/list.html")]
pub struct DistributorListTemplate {
    pub nav: Nav,
    pub distributors: Vec<DistributorRecord>,
    pub search: String,
    pub crop: String,
    pub error: Option<String>,
}

/// Display the distributor listing with search and crop filters applied.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let (distributors, error) = match state.records().fetch_all::<DistributorRecord>().await {
        Ok(distributors) => (filter_distributors(&distributors, &query), None),
        Err(e) => {
            tracing::error!("Failed to fetch distributor records: {}", e);
            (
                Vec::new(),
                Some("Failed to load distributors, please try again later.".to_owned()),
            )
        }
    };

    DistributorListTemplate {
        nav: Nav::for_user(&user),
        distributors,
        search: query.search,
        crop: query.crop,
        error,
    }
}
