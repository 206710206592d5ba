use crate::application::ports::archive_repository::ArchiveRepository;
use crate::domain::archive::document::ArchivedDocument;

pub struct ListDocuments<'a, R: ArchiveRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArchiveRepository + ?Sized> ListDocuments<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<ArchivedDocument>> {
        self.repo.list_all().await
    }
}
