use crate::application::dto::letters::{ArchivedLetterDto, GeneratedArtifact};
use crate::application::ports::letter_repository::LetterRepository;
use crate::application::ports::storage_port::{FileArea, StoragePort};
use crate::domain::letters::letter::ArtifactKind;

pub struct GetLetter<'a, R, S>
where
    R: LetterRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> GetLetter<'a, R, S>
where
    R: LetterRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<ArchivedLetterDto>> {
        let Some(letter) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        let mut artifacts = Vec::new();
        for kind in [ArtifactKind::Html, ArtifactKind::Pdf] {
            let filename = kind.file_name(&letter.letter_number);
            if self.storage.exists(FileArea::Generated, &filename).await {
                artifacts.push(GeneratedArtifact { kind, filename });
            }
        }
        Ok(Some(ArchivedLetterDto { letter, artifacts }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::letters::letter::LetterDraft;
    use crate::infrastructure::db::repositories::letter_repository_sqlx::SqlxLetterRepository;
    use crate::infrastructure::db::{connect_in_memory, migrate};
    use crate::infrastructure::storage::port_impl::FsStoragePort;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_only_artifacts_present_on_disk() {
        let temp = TempDir::new().unwrap();
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        let repo = SqlxLetterRepository::new(pool);
        let storage = FsStoragePort::new(temp.path().join("arsip"), temp.path().join("generated"));
        storage.ensure_dirs().await.unwrap();

        let letter = repo
            .insert_numbered(
                &LetterDraft {
                    letter_type: "sktm".into(),
                    applicant_name: "Budi".into(),
                    applicant_id_number: None,
                    purpose: String::new(),
                    raw_payload: "{}".into(),
                },
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap(),
            )
            .await
            .unwrap();
        storage
            .write(FileArea::Generated, "SKTM_2024-01-01_001.html", b"<html/>")
            .await
            .unwrap();

        let uc = GetLetter {
            repo: &repo,
            storage: &storage,
        };
        let view = uc.execute(letter.id).await.unwrap().unwrap();
        assert_eq!(view.artifacts.len(), 1);
        assert_eq!(view.artifacts[0].kind, ArtifactKind::Html);

        assert!(uc.execute(letter.id + 1).await.unwrap().is_none());
    }
}
