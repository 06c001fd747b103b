//! Admin management routes.
//!
//! All handlers here require the admin role via [`RequireAdmin`]; a
//! logged-in non-admin is redirected home before the handler runs.
//!
//! Validation failures re-render the management page with the submitted
//! values still in the form, so nothing is lost on a typo.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use agrilink_core::split_tags;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{DistributorInput, DistributorRecord, SoilInput, SoilRecord};
use crate::routes::Nav;
use crate::state::AppState;
use crate::store::collections;

// =============================================================================
// Form Types
// =============================================================================

/// Soil management form data, as submitted.
///
/// `ph` arrives as text and is parsed/range-checked by validation;
/// `suitable_crops` is the raw comma-separated input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilForm {
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub ph: String,
    #[serde(default)]
    pub nutrients: String,
    #[serde(default)]
    pub suitable_crops: String,
    #[serde(default)]
    pub characteristics: String,
}

/// Distributor management form data, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistributorForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub crop_types: String,
    #[serde(default)]
    pub seeds_available: String,
}

/// Query parameters for the management pages.
#[derive(Debug, Default, Deserialize)]
pub struct ManageQuery {
    /// Id of the record being edited; prefills the form.
    pub edit: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Nav,
    pub soil_count: usize,
    pub distributor_count: usize,
    pub user_count: usize,
    pub error: Option<String>,
}

/// Soil management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/soils.html")]
pub struct SoilManageTemplate {
    pub nav: Nav,
    pub soils: Vec<SoilRecord>,
    pub form: SoilForm,
    /// Empty when the form is in create mode.
    pub editing_id: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Distributor management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/distributors.html")]
pub struct DistributorManageTemplate {
    pub nav: Nav,
    pub distributors: Vec<DistributorRecord>,
    pub form: DistributorForm,
    /// Empty when the form is in create mode.
    pub editing_id: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Display the admin dashboard with collection counts.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> impl IntoResponse {
    let records = state.records();

    let soils = records.fetch_all::<SoilRecord>().await;
    let distributors = records.fetch_all::<DistributorRecord>().await;
    let users = state.store().list(collections::USERS).await;

    let error = if soils.is_err() || distributors.is_err() || users.is_err() {
        Some("Some counts could not be loaded.".to_owned())
    } else {
        None
    };

    DashboardTemplate {
        nav: Nav::for_user(&user),
        soil_count: soils.map(|s| s.len()).unwrap_or_default(),
        distributor_count: distributors.map(|d| d.len()).unwrap_or_default(),
        user_count: users.map(|u| u.len()).unwrap_or_default(),
        error,
    }
}

// =============================================================================
// Soil Management
// =============================================================================

/// Display the soil management page (form + table).
pub async fn soils_page(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<ManageQuery>,
) -> impl IntoResponse {
    let (soils, load_error) = fetch_soils(&state).await;

    // Prefill the form when editing an existing record.
    let editing_id = query.edit.unwrap_or_default();
    let form = soils
        .iter()
        .find(|soil| soil.id.as_str() == editing_id)
        .map(soil_form_from_record)
        .unwrap_or_default();

    SoilManageTemplate {
        nav: Nav::for_user(&user),
        soils,
        form,
        editing_id,
        error: load_error.or(query.error.map(manage_error_message)),
        success: query.success.map(manage_success_message),
    }
}

/// Handle soil creation form submission.
pub async fn create_soil(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Form(form): Form<SoilForm>,
) -> Response {
    let input = match validate_soil_form(&form) {
        Ok(input) => input,
        Err(error) => {
            return soil_page_with_form(&state, &user, form, String::new(), error.user_message())
                .await
                .into_response();
        }
    };

    match state.records().add::<SoilRecord>(&input).await {
        Ok(_) => Redirect::to("/admin/soils?success=created").into_response(),
        Err(e) => {
            tracing::error!("Failed to create soil record: {}", e);
            Redirect::to("/admin/soils?error=store").into_response()
        }
    }
}

/// Handle soil update form submission.
pub async fn update_soil(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<SoilForm>,
) -> Response {
    let input = match validate_soil_form(&form) {
        Ok(input) => input,
        Err(error) => {
            return soil_page_with_form(&state, &user, form, id, error.user_message())
                .await
                .into_response();
        }
    };

    match state.records().update::<SoilRecord>(&id, &input).await {
        Ok(()) => Redirect::to("/admin/soils?success=updated").into_response(),
        Err(e) => {
            tracing::error!("Failed to update soil record {}: {}", id, e);
            Redirect::to("/admin/soils?error=store").into_response()
        }
    }
}

/// Handle soil deletion. Deleting an already-gone id still succeeds.
pub async fn delete_soil(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    match state.records().delete::<SoilRecord>(&id).await {
        Ok(()) => Redirect::to("/admin/soils?success=deleted").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete soil record {}: {}", id, e);
            Redirect::to("/admin/soils?error=store").into_response()
        }
    }
}

async fn fetch_soils(state: &AppState) -> (Vec<SoilRecord>, Option<String>) {
    match state.records().fetch_all::<SoilRecord>().await {
        Ok(soils) => (soils, None),
        Err(e) => {
            tracing::error!("Failed to fetch soil records: {}", e);
            (
                Vec::new(),
                Some("Failed to load soil types.".to_owned()),
            )
        }
    }
}

async fn soil_page_with_form(
    state: &AppState,
    user: &crate::models::CurrentUser,
    form: SoilForm,
    editing_id: String,
    error: String,
) -> SoilManageTemplate {
    let (soils, _) = fetch_soils(state).await;
    SoilManageTemplate {
        nav: Nav::for_user(user),
        soils,
        form,
        editing_id,
        error: Some(error),
        success: None,
    }
}

fn soil_form_from_record(soil: &SoilRecord) -> SoilForm {
    SoilForm {
        soil_type: soil.soil_type.clone(),
        ph: soil.ph.to_string(),
        nutrients: soil.nutrients.clone(),
        suitable_crops: agrilink_core::join_tags(&soil.suitable_crops),
        characteristics: soil.characteristics.clone(),
    }
}

/// Validate the soil form and convert it into a store payload.
fn validate_soil_form(form: &SoilForm) -> Result<SoilInput, AppError> {
    let soil_type = form.soil_type.trim();
    if soil_type.is_empty() {
        return Err(AppError::Validation("Soil type is required.".to_owned()));
    }

    let ph: f64 = form
        .ph
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("pH must be a number.".to_owned()))?;
    if !(0.0..=14.0).contains(&ph) {
        return Err(AppError::Validation(
            "pH must be between 0 and 14.".to_owned(),
        ));
    }

    Ok(SoilInput {
        soil_type: soil_type.to_owned(),
        ph,
        nutrients: form.nutrients.trim().to_owned(),
        suitable_crops: split_tags(&form.suitable_crops),
        characteristics: form.characteristics.trim().to_owned(),
    })
}

// =============================================================================
// Distributor Management
// =============================================================================

/// Display the distributor management page (form + table).
pub async fn distributors_page(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<ManageQuery>,
) -> impl IntoResponse {
    let (distributors, load_error) = fetch_distributors(&state).await;

    let editing_id = query.edit.unwrap_or_default();
    let form = distributors
        .iter()
        .find(|distributor| distributor.id.as_str() == editing_id)
        .map(distributor_form_from_record)
        .unwrap_or_default();

    DistributorManageTemplate {
        nav: Nav::for_user(&user),
        distributors,
        form,
        editing_id,
        error: load_error.or(query.error.map(manage_error_message)),
        success: query.success.map(manage_success_message),
    }
}

/// Handle distributor creation form submission.
pub async fn create_distributor(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Form(form): Form<DistributorForm>,
) -> Response {
    let input = match validate_distributor_form(&form) {
        Ok(input) => input,
        Err(error) => {
            return distributor_page_with_form(&state, &user, form, String::new(), error.user_message())
                .await
                .into_response();
        }
    };

    match state.records().add::<DistributorRecord>(&input).await {
        Ok(_) => Redirect::to("/admin/distributors?success=created").into_response(),
        Err(e) => {
            tracing::error!("Failed to create distributor record: {}", e);
            Redirect::to("/admin/distributors?error=store").into_response()
        }
    }
}

/// Handle distributor update form submission.
pub async fn update_distributor(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<DistributorForm>,
) -> Response {
    let input = match validate_distributor_form(&form) {
        Ok(input) => input,
        Err(error) => {
            return distributor_page_with_form(&state, &user, form, id, error.user_message())
                .await
                .into_response();
        }
    };

    match state
        .records()
        .update::<DistributorRecord>(&id, &input)
        .await
    {
        Ok(()) => Redirect::to("/admin/distributors?success=updated").into_response(),
        Err(e) => {
            tracing::error!("Failed to update distributor record {}: {}", id, e);
            Redirect::to("/admin/distributors?error=store").into_response()
        }
    }
}

/// Handle distributor deletion.
pub async fn delete_distributor(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    match state.records().delete::<DistributorRecord>(&id).await {
        Ok(()) => Redirect::to("/admin/distributors?success=deleted").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete distributor record {}: {}", id, e);
            Redirect::to("/admin/distributors?error=store").into_response()
        }
    }
}

async fn fetch_distributors(state: &AppState) -> (Vec<DistributorRecord>, Option<String>) {
    match state.records().fetch_all::<DistributorRecord>().await {
        Ok(distributors) => (distributors, None),
        Err(e) => {
            tracing::error!("Failed to fetch distributor records: {}", e);
            (
                Vec::new(),
                Some("Failed to load distributors.".to_owned()),
            )
        }
    }
}

async fn distributor_page_with_form(
    state: &AppState,
    user: &crate::models::CurrentUser,
    form: DistributorForm,
    editing_id: String,
    error: String,
) -> DistributorManageTemplate {
    let (distributors, _) = fetch_distributors(state).await;
    DistributorManageTemplate {
        nav: Nav::for_user(user),
        distributors,
        form,
        editing_id,
        error: Some(error),
        success: None,
    }
}

fn distributor_form_from_record(distributor: &DistributorRecord) -> DistributorForm {
    DistributorForm {
        name: distributor.name.clone(),
        location: distributor.location.clone(),
        contact_info: distributor.contact_info.clone(),
        crop_types: agrilink_core::join_tags(&distributor.crop_types),
        seeds_available: agrilink_core::join_tags(&distributor.seeds_available),
    }
}

/// Validate the distributor form and convert it into a store payload.
fn validate_distributor_form(form: &DistributorForm) -> Result<DistributorInput, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required.".to_owned()));
    }

    let location = form.location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("Location is required.".to_owned()));
    }

    Ok(DistributorInput {
        name: name.to_owned(),
        location: location.to_owned(),
        contact_info: form.contact_info.trim().to_owned(),
        crop_types: split_tags(&form.crop_types),
        seeds_available: split_tags(&form.seeds_available),
    })
}

// =============================================================================
// Messages
// =============================================================================

fn manage_error_message(code: String) -> String {
    match code.as_str() {
        "store" => "The change could not be saved, please try again.".to_owned(),
        _ => "Something went wrong, please try again.".to_owned(),
    }
}

fn manage_success_message(code: String) -> String {
    match code.as_str() {
        "created" => "Record created.".to_owned(),
        "updated" => "Record updated.".to_owned(),
        "deleted" => "Record deleted.".to_owned(),
        _ => "Done.".to_owned(),
    }
}
