use async_trait::async_trait;
use std::path::PathBuf;

/// The two on-disk areas the service writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileArea {
    /// Uploaded scans.
    Archive,
    /// Rendered letter artifacts.
    Generated,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub size: i64,
}

#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Writes `bytes` as `filename`, replacing any existing file of that name.
    async fn write(
        &self,
        area: FileArea,
        filename: &str,
        bytes: &[u8],
    ) -> anyhow::Result<StoredFile>;

    /// `Ok(None)` when missing or when `filename` is not a single plain path component.
    async fn read(&self, area: FileArea, filename: &str) -> anyhow::Result<Option<Vec<u8>>>;

    async fn exists(&self, area: FileArea, filename: &str) -> bool;

    /// Absolute target path for `filename`, whether or not it exists yet.
    fn path_for(&self, area: FileArea, filename: &str) -> anyhow::Result<PathBuf>;
}
