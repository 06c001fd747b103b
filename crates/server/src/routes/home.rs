//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Nav;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
}

/// Display the home page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        nav: Nav::for_visitor(user.as_ref()),
    }
}
