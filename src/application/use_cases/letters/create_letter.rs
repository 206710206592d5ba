use chrono::NaiveDateTime;

use crate::application::dto::letters::{CreatedLetterDto, GeneratedArtifact};
use crate::application::ports::letter_repository::{LetterInsertError, LetterRepository};
use crate::application::ports::pdf_renderer::{PdfRenderError, PdfRenderer};
use crate::application::ports::storage_port::{FileArea, StoragePort};
use crate::application::services::letter_render::render_letter;
use crate::domain::letters::letter::{ArtifactKind, LetterDraft, LetterPayload};
use crate::domain::letters::template::{LetterField, LetterTemplate, submitted_letter_type};

#[derive(thiserror::Error, Debug)]
pub enum CreateLetterError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("letter number {0} was allocated twice")]
    NumberCollision(String),
    #[error("failed to write letter artifact")]
    Storage(#[source] anyhow::Error),
    #[error("failed to persist letter")]
    Persist(#[source] anyhow::Error),
    #[error("failed to render pdf")]
    Pdf(#[source] anyhow::Error),
}

pub struct CreateLetter<'a, R, S, P>
where
    R: LetterRepository + ?Sized,
    S: StoragePort + ?Sized,
    P: PdfRenderer + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
    pub pdf: &'a P,
}

impl<'a, R, S, P> CreateLetter<'a, R, S, P>
where
    R: LetterRepository + ?Sized,
    S: StoragePort + ?Sized,
    P: PdfRenderer + ?Sized,
{
    pub async fn execute(
        &self,
        payload: LetterPayload,
        now: NaiveDateTime,
    ) -> Result<CreatedLetterDto, CreateLetterError> {
        let letter_type =
            submitted_letter_type(&payload).ok_or(CreateLetterError::MissingField("letter_type"))?;
        let template = LetterTemplate::for_letter_type(&letter_type);
        let applicant_name = template
            .resolve(&payload, LetterField::ApplicantName)
            .ok_or(CreateLetterError::MissingField("applicant_name"))?;
        let applicant_id_number = template.resolve(&payload, LetterField::ApplicantIdNumber);
        let purpose = template
            .resolve(&payload, LetterField::Purpose)
            .unwrap_or_default();
        let wants_pdf = template
            .resolve(&payload, LetterField::WantsPdf)
            .is_some_and(|v| v == "1");

        let raw_payload = serde_json::to_string(&payload)
            .map_err(|e| CreateLetterError::Persist(e.into()))?;
        let draft = LetterDraft {
            letter_type,
            applicant_name,
            applicant_id_number,
            purpose,
            raw_payload,
        };

        let letter = self
            .repo
            .insert_numbered(&draft, now)
            .await
            .map_err(|err| match err {
                LetterInsertError::NumberTaken(number) => {
                    tracing::error!(letter_number = %number, "letter_number_collision");
                    CreateLetterError::NumberCollision(number)
                }
                LetterInsertError::Other(err) => {
                    tracing::error!(error = ?err, "letter_insert_failed");
                    CreateLetterError::Persist(err)
                }
            })?;

        let html = render_letter(&letter, &payload, template);

        let html_name = ArtifactKind::Html.file_name(&letter.letter_number);
        let stored_html = self
            .storage
            .write(FileArea::Generated, &html_name, html.as_bytes())
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, file = %html_name, "letter_html_write_failed");
                CreateLetterError::Storage(err)
            })?;
        let mut artifacts = vec![GeneratedArtifact {
            kind: ArtifactKind::Html,
            filename: stored_html.filename,
        }];

        let mut pdf_warning = None;
        if wants_pdf {
            let pdf_name = ArtifactKind::Pdf.file_name(&letter.letter_number);
            let target = self
                .storage
                .path_for(FileArea::Generated, &pdf_name)
                .map_err(CreateLetterError::Storage)?;
            match self.pdf.render(&html, &target).await {
                Ok(()) => artifacts.push(GeneratedArtifact {
                    kind: ArtifactKind::Pdf,
                    filename: pdf_name,
                }),
                Err(PdfRenderError::Unavailable(reason)) => {
                    tracing::warn!(letter_number = %letter.letter_number, reason = %reason, "pdf_engine_unavailable");
                    pdf_warning = Some(format!("PDF tidak dibuat: {reason}"));
                }
                Err(PdfRenderError::Failed(err)) => {
                    tracing::error!(error = ?err, letter_number = %letter.letter_number, "pdf_render_failed");
                    return Err(CreateLetterError::Pdf(err));
                }
            }
        }

        tracing::info!(
            id = letter.id,
            letter_number = %letter.letter_number,
            template = template.id(),
            html_size = stored_html.size,
            "letter_created"
        );
        Ok(CreatedLetterDto {
            letter,
            template_id: template.id(),
            artifacts,
            preview_html: html,
            pdf_warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::repositories::letter_repository_sqlx::SqlxLetterRepository;
    use crate::infrastructure::db::{connect_in_memory, migrate};
    use crate::infrastructure::pdf::DisabledPdfRenderer;
    use crate::infrastructure::storage::port_impl::FsStoragePort;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::TempDir;

    /// Writes a placeholder PDF instead of shelling out.
    struct FakePdf;

    #[async_trait]
    impl PdfRenderer for FakePdf {
        async fn render(&self, _html: &str, output: &Path) -> Result<(), PdfRenderError> {
            tokio::fs::write(output, b"%PDF-1.4")
                .await
                .map_err(|e| PdfRenderError::Failed(e.into()))
        }
    }

    async fn fixtures(temp: &TempDir) -> (SqlxLetterRepository, FsStoragePort) {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        let storage = FsStoragePort::new(temp.path().join("arsip"), temp.path().join("generated"));
        storage.ensure_dirs().await.unwrap();
        (SqlxLetterRepository::new(pool), storage)
    }

    fn payload(pairs: &[(&str, &str)]) -> LetterPayload {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn jan_first(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn creates_numbered_letter_with_html_artifact() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &DisabledPdfRenderer,
        };

        let out = uc
            .execute(
                payload(&[
                    ("jenis_surat", "sktm"),
                    ("nama_pemohon", " Budi "),
                    ("nik_pemohon", ""),
                    ("nik", "3201"),
                    ("keperluan", "Beasiswa"),
                ]),
                jan_first(8),
            )
            .await
            .unwrap();

        assert_eq!(out.letter.letter_number, "SKTM/2024-01-01/001");
        assert_eq!(out.letter.applicant_name, "Budi");
        assert_eq!(out.letter.applicant_id_number.as_deref(), Some("3201"));
        assert_eq!(out.letter.purpose, "Beasiswa");
        assert_eq!(out.template_id, "surat_sktm");
        assert_eq!(out.artifacts.len(), 1);
        assert_eq!(out.artifacts[0].filename, "SKTM_2024-01-01_001.html");
        assert!(out.pdf_warning.is_none());

        let written =
            std::fs::read_to_string(temp.path().join("generated/SKTM_2024-01-01_001.html")).unwrap();
        assert_eq!(written, out.preview_html);

        let stored = out.letter.payload();
        assert_eq!(stored.get("nik").map(String::as_str), Some("3201"));
        assert_eq!(stored.len(), 5);
    }

    #[tokio::test]
    async fn same_day_submissions_are_sequential() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &DisabledPdfRenderer,
        };

        let mut numbers = Vec::new();
        for (i, kind) in ["sktm", "usaha", "sktm", "lainnya"].iter().enumerate() {
            let out = uc
                .execute(
                    payload(&[("jenis_surat", *kind), ("nama", "Warga")]),
                    jan_first(8 + i as u32),
                )
                .await
                .unwrap();
            numbers.push(out.letter.letter_number);
        }
        assert_eq!(
            numbers,
            vec![
                "SKTM/2024-01-01/001",
                "USAHA/2024-01-01/002",
                "SKTM/2024-01-01/003",
                "LAINNYA/2024-01-01/004",
            ]
        );
    }

    #[tokio::test]
    async fn hostile_letter_type_still_gets_an_artifact() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &DisabledPdfRenderer,
        };

        let first = uc
            .execute(
                payload(&[("jenis_surat", "sk\\tm"), ("nama", "Siti")]),
                jan_first(8),
            )
            .await
            .unwrap();
        assert_eq!(first.letter.letter_number, "SK\\TM/2024-01-01/001");
        assert_eq!(first.artifacts[0].filename, "SK-TM_2024-01-01_001.html");
        assert!(temp.path().join("generated/SK-TM_2024-01-01_001.html").exists());

        let second = uc
            .execute(payload(&[("jenis_surat", "sktm"), ("nama", "Budi")]), jan_first(9))
            .await
            .unwrap();
        assert_eq!(second.letter.letter_number, "SKTM/2024-01-01/002");
    }

    #[tokio::test]
    async fn unavailable_pdf_engine_downgrades_to_warning() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &DisabledPdfRenderer,
        };

        let out = uc
            .execute(
                payload(&[("jenis_surat", "skd"), ("nama", "Siti"), ("pdf", "1")]),
                jan_first(10),
            )
            .await
            .unwrap();
        assert_eq!(out.artifacts.len(), 1);
        assert_eq!(out.artifacts[0].kind, ArtifactKind::Html);
        assert!(out.pdf_warning.is_some());
        assert!(!temp.path().join("generated/SKD_2024-01-01_001.pdf").exists());
    }

    #[tokio::test]
    async fn requested_pdf_is_written_next_to_html() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &FakePdf,
        };

        let out = uc
            .execute(
                payload(&[("jenis_surat", "skd"), ("nama", "Siti"), ("buat_pdf", "1")]),
                jan_first(10),
            )
            .await
            .unwrap();
        let names: Vec<&str> = out.artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["SKD_2024-01-01_001.html", "SKD_2024-01-01_001.pdf"]);
        assert!(temp.path().join("generated/SKD_2024-01-01_001.pdf").exists());
    }

    #[tokio::test]
    async fn pdf_only_when_checkbox_is_one() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &FakePdf,
        };

        let out = uc
            .execute(
                payload(&[("jenis_surat", "skd"), ("nama", "Siti"), ("pdf", "on")]),
                jan_first(10),
            )
            .await
            .unwrap();
        assert_eq!(out.artifacts.len(), 1);
        assert!(out.pdf_warning.is_none());
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        let (repo, storage) = fixtures(&temp).await;
        let uc = CreateLetter {
            repo: &repo,
            storage: &storage,
            pdf: &DisabledPdfRenderer,
        };

        let err = uc
            .execute(payload(&[("nama", "Siti")]), jan_first(9))
            .await
            .unwrap_err();
        assert!(matches!(err, CreateLetterError::MissingField("letter_type")));

        let err = uc
            .execute(payload(&[("jenis_surat", "sktm"), ("nama", "  ")]), jan_first(9))
            .await
            .unwrap_err();
        assert!(matches!(err, CreateLetterError::MissingField("applicant_name")));
        assert_eq!(repo.count_for_day(jan_first(0).date()).await.unwrap(), 0);
    }
}
