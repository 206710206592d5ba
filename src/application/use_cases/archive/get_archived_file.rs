use crate::application::dto::files::ServedFile;
use crate::application::ports::storage_port::{FileArea, StoragePort};

pub struct GetArchivedFile<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
}

impl<'a, S: StoragePort + ?Sized> GetArchivedFile<'a, S> {
    /// `None` when the name is unknown or not a plain file name.
    pub async fn execute(&self, filename: &str) -> anyhow::Result<Option<ServedFile>> {
        let bytes = self.storage.read(FileArea::Archive, filename).await?;
        Ok(bytes.map(|bytes| ServedFile {
            filename: filename.to_string(),
            bytes,
        }))
    }
}
