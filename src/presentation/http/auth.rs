use axum::{
    Router,
    response::{Html, Redirect},
    routing::get,
};

use crate::presentation::http::pages;

// Login is a stub: any submission lands on the dashboard.

pub async fn login_form() -> Html<String> {
    Html(pages::login_page())
}

pub async fn login_submit() -> Redirect {
    Redirect::to("/dashboard")
}

pub fn routes() -> Router {
    Router::new().route("/", get(login_form).post(login_submit))
}
