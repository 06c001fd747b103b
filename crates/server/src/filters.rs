//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use agrilink_core::join_tags;

/// Joins a tag list with `", "` for display.
///
/// Usage in templates: `{{ soil.suitable_crops|tag_list }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn tag_list(tags: &[String], _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(join_tags(tags))
}

/// Formats an optional timestamp as `YYYY-MM-DD`, or `-` when absent.
///
/// Usage in templates: `{{ soil.updated_at|date_ymd }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn date_ymd(
    value: &Option<chrono::DateTime<chrono::Utc>>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.map_or_else(
        || "-".to_owned(),
        |ts| ts.format("%Y-%m-%d").to_string(),
    ))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
