use std::path::Path;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;

/// Service readiness. `status` is `ok` only when every check passes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub database: bool,
    pub storage: bool,
}

async fn dir_present(dir: &str) -> bool {
    tokio::fs::metadata(Path::new(dir))
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResp> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&ctx.pool())
        .await
    {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = ?err, "health_database_unreachable");
            false
        }
    };
    let storage =
        dir_present(&ctx.cfg.archive_dir).await && dir_present(&ctx.cfg.generated_dir).await;
    if !storage {
        tracing::warn!(
            archive_dir = %ctx.cfg.archive_dir,
            generated_dir = %ctx.cfg.generated_dir,
            "health_storage_missing"
        );
    }
    Json(HealthResp {
        status: if database && storage { "ok" } else { "degraded" },
        database,
        storage,
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(ctx)
}
