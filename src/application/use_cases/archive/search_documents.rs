use crate::application::ports::archive_repository::ArchiveRepository;
use crate::application::use_cases::SEARCH_LIMIT;
use crate::domain::archive::document::DocumentHit;

pub struct SearchDocuments<'a, R: ArchiveRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ArchiveRepository + ?Sized> SearchDocuments<'a, R> {
    /// Blank queries return nothing rather than the whole archive.
    pub async fn execute(&self, q: Option<String>) -> anyhow::Result<Vec<DocumentHit>> {
        let q = q.unwrap_or_default();
        let q = q.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.search(q, SEARCH_LIMIT).await
    }
}
