use crate::application::dto::files::ServedFile;
use crate::application::ports::storage_port::{FileArea, StoragePort};

pub struct DownloadArtifact<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
}

impl<'a, S: StoragePort + ?Sized> DownloadArtifact<'a, S> {
    pub async fn execute(&self, filename: &str) -> anyhow::Result<Option<ServedFile>> {
        let bytes = self.storage.read(FileArea::Generated, filename).await?;
        if bytes.is_none() {
            tracing::warn!(file = %filename, "generated_artifact_missing");
        }
        Ok(bytes.map(|bytes| ServedFile {
            filename: filename.to_string(),
            bytes,
        }))
    }
}
