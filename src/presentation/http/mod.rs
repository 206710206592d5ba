pub mod archive;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod letters;
pub mod pages;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        archive::search_documents,
        letters::search_letters,
    ),
    components(schemas(
        health::HealthResp,
        archive::DocumentSearchItem,
        letters::LetterSearchItem,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Archive", description = "Digital document archive"),
        (name = "Letters", description = "Village letter management"),
    )
)]
pub struct ApiDoc;

/// Plain-text error body used by the form endpoints.
pub(crate) fn text_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, message.into()).into_response()
}

pub(crate) fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page(message))).into_response()
}

/// Full application router: HTML pages, JSON search API, file downloads and docs.
pub fn router(ctx: AppContext) -> Router {
    let body_limit = ctx.cfg.upload_max_bytes;
    Router::new()
        .merge(auth::routes())
        .merge(dashboard::routes(ctx.clone()))
        .merge(archive::routes(ctx.clone()))
        .merge(letters::routes(ctx.clone()))
        .nest("/api", health::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
