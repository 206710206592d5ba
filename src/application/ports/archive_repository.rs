use async_trait::async_trait;

use crate::domain::archive::document::{ArchivedDocument, DocumentHit, NewArchivedDocument};

#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// All documents, newest upload first.
    async fn list_all(&self) -> anyhow::Result<Vec<ArchivedDocument>>;

    async fn insert(&self, doc: &NewArchivedDocument) -> anyhow::Result<ArchivedDocument>;

    /// Substring match on name, id number and category.
    async fn search(&self, query: &str, limit: i64) -> anyhow::Result<Vec<DocumentHit>>;

    async fn count(&self) -> anyhow::Result<i64>;
}
