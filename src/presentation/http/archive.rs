use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::use_cases::archive::add_document::{
    AddDocument, AddDocumentError, DocumentUpload,
};
use crate::application::use_cases::archive::get_archived_file::GetArchivedFile;
use crate::application::use_cases::archive::list_documents::ListDocuments;
use crate::application::use_cases::archive::search_documents::SearchDocuments;
use crate::bootstrap::app_context::AppContext;
use crate::domain::archive::document::DocumentHit;
use crate::presentation::http::{not_found, pages, text_error};

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentSearchItem {
    pub archive_name: String,
    pub document_name: String,
    pub category: String,
}

impl From<DocumentHit> for DocumentSearchItem {
    fn from(h: DocumentHit) -> Self {
        DocumentSearchItem {
            archive_name: h.archive_name,
            document_name: h.document_name,
            category: h.category,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring matched against name, NIK and category.
    pub q: Option<String>,
}

pub async fn list_documents(State(ctx): State<AppContext>) -> Result<Html<String>, StatusCode> {
    let repo = ctx.archive_repo();
    let uc = ListDocuments {
        repo: repo.as_ref(),
    };
    let docs = uc.execute().await.map_err(|err| {
        tracing::error!(error = ?err, "archive_list_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(pages::archive_page(&docs)))
}

pub async fn add_document_form() -> Html<String> {
    Html(pages::add_document_page())
}

/// Collects the upload form. Text fields accept their Indonesian aliases.
async fn read_upload(mut multipart: Multipart) -> Result<DocumentUpload, Response> {
    let mut upload = DocumentUpload::default();
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!("archive_upload_too_large");
        }
        text_error(status, err.body_text())
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.original_filename = field.file_name().map(str::to_string);
            upload.bytes = field
                .bytes()
                .await
                .map_err(|err| text_error(err.status(), err.body_text()))?
                .to_vec();
            continue;
        }
        let slot = match name.as_str() {
            "category" | "kategori" => &mut upload.category,
            "category_other" | "kategori_lainnya" => &mut upload.category_other,
            "document_name" | "nama_dokumen" => &mut upload.document_name,
            "id_number" | "nik_dokumen" => &mut upload.id_number,
            _ => continue,
        };
        let text = field
            .text()
            .await
            .map_err(|err| text_error(err.status(), err.body_text()))?;
        // An empty alias must not clobber a value sent under the other name.
        if slot.is_none() || !text.trim().is_empty() {
            *slot = Some(text);
        }
    }
    Ok(upload)
}

pub async fn add_document(State(ctx): State<AppContext>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let repo = ctx.archive_repo();
    let storage = ctx.storage_port();
    let uc = AddDocument {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
    };
    match uc.execute(upload, Local::now().naive_local()).await {
        Ok(_) => Redirect::to("/arsip-digital").into_response(),
        Err(AddDocumentError::MissingFile) => {
            text_error(StatusCode::BAD_REQUEST, "Tidak ada berkas yang dipilih")
        }
        Err(AddDocumentError::MissingCategory) => {
            text_error(StatusCode::BAD_REQUEST, "Kategori wajib diisi")
        }
        Err(AddDocumentError::Storage(_) | AddDocumentError::Persist(_)) => text_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Gagal menyimpan dokumen",
        ),
    }
}

#[utoipa::path(get, path = "/api/search", tag = "Archive",
    params(SearchQuery),
    responses((status = 200, body = [DocumentSearchItem])))]
pub async fn search_documents(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<DocumentSearchItem>>, StatusCode> {
    let repo = ctx.archive_repo();
    let uc = SearchDocuments {
        repo: repo.as_ref(),
    };
    let hits = uc.execute(params.q).await.map_err(|err| {
        tracing::error!(error = ?err, "archive_search_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(hits.into_iter().map(Into::into).collect()))
}

pub async fn serve_archived_file(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Response {
    let storage = ctx.storage_port();
    let uc = GetArchivedFile {
        storage: storage.as_ref(),
    };
    let file = match uc.execute(&filename).await {
        Ok(Some(f)) => f,
        Ok(None) => return not_found("Berkas arsip tidak ditemukan."),
        Err(err) => {
            tracing::error!(error = ?err, file = %filename, "archive_read_failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    let mime = mime_guess::from_path(&file.filename).first_or_octet_stream();
    if let Ok(v) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, v);
    }
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    (headers, file.bytes).into_response()
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/arsip-digital", get(list_documents).post(add_document))
        .route("/tambah-arsip", get(add_document_form).post(add_document))
        .route("/api/search", get(search_documents))
        .route("/arsip/:filename", get(serve_archived_file))
        .with_state(ctx)
}
