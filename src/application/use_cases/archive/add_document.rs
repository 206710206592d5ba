use chrono::NaiveDateTime;

use crate::application::ports::archive_repository::ArchiveRepository;
use crate::application::ports::storage_port::{FileArea, StoragePort};
use crate::domain::archive::document::{ArchivedDocument, NewArchivedDocument};
use crate::domain::archive::naming::{UNNAMED_DOCUMENT, archive_file_name, resolve_category};

#[derive(thiserror::Error, Debug)]
pub enum AddDocumentError {
    #[error("no file was selected")]
    MissingFile,
    #[error("category is required")]
    MissingCategory,
    #[error("failed to store archive file")]
    Storage(#[source] anyhow::Error),
    #[error("failed to persist document metadata")]
    Persist(#[source] anyhow::Error),
}

/// Raw upload form as received from the client.
#[derive(Debug, Default, Clone)]
pub struct DocumentUpload {
    pub original_filename: Option<String>,
    pub bytes: Vec<u8>,
    pub category: Option<String>,
    pub category_other: Option<String>,
    pub document_name: Option<String>,
    pub id_number: Option<String>,
}

pub struct AddDocument<'a, R, S>
where
    R: ArchiveRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> AddDocument<'a, R, S>
where
    R: ArchiveRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub async fn execute(
        &self,
        upload: DocumentUpload,
        now: NaiveDateTime,
    ) -> Result<ArchivedDocument, AddDocumentError> {
        let original = upload
            .original_filename
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AddDocumentError::MissingFile)?;
        let selected = upload
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AddDocumentError::MissingCategory)?;

        let category = resolve_category(selected, upload.category_other.as_deref());
        let document_name = upload
            .document_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNNAMED_DOCUMENT)
            .to_string();
        let id_number = upload
            .id_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let archive_name = archive_file_name(&category, &document_name, original, now);

        // Same-second uploads with identical category and name overwrite the file;
        // the unique archive_name column then rejects the second row.
        let stored = self
            .storage
            .write(FileArea::Archive, &archive_name, &upload.bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, archive_name = %archive_name, "archive_write_failed");
                AddDocumentError::Storage(err)
            })?;

        let doc = self
            .repo
            .insert(&NewArchivedDocument {
                archive_name: archive_name.clone(),
                document_name,
                id_number,
                category,
                uploaded_at: now,
            })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, archive_name = %archive_name, "archive_insert_failed");
                AddDocumentError::Persist(err)
            })?;

        tracing::info!(
            id = doc.id,
            archive_name = %stored.filename,
            size = stored.size,
            category = %doc.category,
            "document_archived"
        );
        Ok(doc)
    }
}
