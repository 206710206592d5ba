use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
};
use chrono::Local;

use crate::application::use_cases::dashboard::summary::DashboardSummary;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::pages;

pub async fn dashboard(State(ctx): State<AppContext>) -> Result<Html<String>, StatusCode> {
    let archive = ctx.archive_repo();
    let letters = ctx.letter_repo();
    let uc = DashboardSummary {
        archive: archive.as_ref(),
        letters: letters.as_ref(),
    };
    let summary = uc
        .execute(Local::now().date_naive())
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "dashboard_summary_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Html(pages::dashboard_page(&summary)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .with_state(ctx)
}
