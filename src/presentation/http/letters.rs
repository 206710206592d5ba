use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::use_cases::letters::create_letter::{CreateLetter, CreateLetterError};
use crate::application::use_cases::letters::download_artifact::DownloadArtifact;
use crate::application::use_cases::letters::get_letter::GetLetter;
use crate::application::use_cases::letters::search_letters::SearchLetters;
use crate::bootstrap::app_context::AppContext;
use crate::domain::letters::letter::{LetterHit, LetterPayload};
use crate::presentation::http::{not_found, pages, text_error};

#[derive(Debug, Serialize, ToSchema)]
pub struct LetterSearchItem {
    pub id: i64,
    pub letter_number: String,
    pub applicant_name: String,
    pub letter_type: String,
}

impl From<LetterHit> for LetterSearchItem {
    fn from(h: LetterHit) -> Self {
        LetterSearchItem {
            id: h.id,
            letter_number: h.letter_number,
            applicant_name: h.applicant_name,
            letter_type: h.letter_type,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LetterSearchQuery {
    /// Substring matched against applicant name, NIK and letter number.
    pub q: Option<String>,
}

pub async fn letter_form() -> Html<String> {
    Html(pages::letter_form_page())
}

pub async fn create_letter(
    State(ctx): State<AppContext>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    // Repeated keys: last one wins.
    let payload: LetterPayload = fields.into_iter().collect();

    let repo = ctx.letter_repo();
    let storage = ctx.storage_port();
    let pdf = ctx.pdf_renderer();
    let uc = CreateLetter {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
        pdf: pdf.as_ref(),
    };
    match uc.execute(payload, Local::now().naive_local()).await {
        Ok(created) => Html(pages::letter_result_page(&created)).into_response(),
        Err(CreateLetterError::MissingField(field)) => text_error(
            StatusCode::BAD_REQUEST,
            format!("Kolom wajib belum diisi: {field}"),
        ),
        Err(err) => {
            tracing::error!(error = %err, "letter_create_failed");
            text_error(StatusCode::INTERNAL_SERVER_ERROR, "Gagal membuat surat")
        }
    }
}

#[utoipa::path(get, path = "/api/search-surat", tag = "Letters",
    params(LetterSearchQuery),
    responses((status = 200, body = [LetterSearchItem])))]
pub async fn search_letters(
    State(ctx): State<AppContext>,
    Query(params): Query<LetterSearchQuery>,
) -> Result<Json<Vec<LetterSearchItem>>, StatusCode> {
    let repo = ctx.letter_repo();
    let uc = SearchLetters {
        repo: repo.as_ref(),
    };
    let hits = uc.execute(params.q).await.map_err(|err| {
        tracing::error!(error = ?err, "letter_search_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(hits.into_iter().map(Into::into).collect()))
}

pub async fn view_letter(State(ctx): State<AppContext>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return not_found("Surat tidak ditemukan.");
    };
    let repo = ctx.letter_repo();
    let storage = ctx.storage_port();
    let uc = GetLetter {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
    };
    match uc.execute(id).await {
        Ok(Some(view)) => Html(pages::letter_view_page(&view)).into_response(),
        Ok(None) => not_found("Surat tidak ditemukan."),
        Err(err) => {
            tracing::error!(error = ?err, id, "letter_view_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn download_generated(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Response {
    let storage = ctx.storage_port();
    let uc = DownloadArtifact {
        storage: storage.as_ref(),
    };
    let file = match uc.execute(&filename).await {
        Ok(Some(f)) => f,
        Ok(None) => return not_found("Berkas surat tidak ditemukan."),
        Err(err) => {
            tracing::error!(error = ?err, file = %filename, "artifact_read_failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    let mime = mime_guess::from_path(&file.filename).first_or_octet_stream();
    if let Ok(v) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, v);
    }
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    (headers, file.bytes).into_response()
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/manajemen-surat", get(letter_form).post(create_letter))
        .route("/api/search-surat", get(search_letters))
        .route("/surat/arsip/:id", get(view_letter))
        .route("/generated/:filename", get(download_generated))
        .with_state(ctx)
}
