use std::path::{Path, PathBuf};

use crate::application::ports::storage_port::{FileArea, StoragePort, StoredFile};
use crate::infrastructure::storage::safe_join;

pub struct FsStoragePort {
    pub archive_root: PathBuf,
    pub generated_root: PathBuf,
}

impl FsStoragePort {
    pub fn new(archive_root: impl Into<PathBuf>, generated_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
            generated_root: generated_root.into(),
        }
    }

    /// Creates both directories if they are missing.
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        crate::infrastructure::storage::ensure_dir(&self.archive_root).await?;
        crate::infrastructure::storage::ensure_dir(&self.generated_root).await?;
        Ok(())
    }

    fn root(&self, area: FileArea) -> &Path {
        match area {
            FileArea::Archive => self.archive_root.as_path(),
            FileArea::Generated => self.generated_root.as_path(),
        }
    }
}

#[async_trait::async_trait]
impl StoragePort for FsStoragePort {
    async fn write(
        &self,
        area: FileArea,
        filename: &str,
        bytes: &[u8],
    ) -> anyhow::Result<StoredFile> {
        let path = safe_join(self.root(area), filename)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(StoredFile {
            filename: filename.to_string(),
            size: bytes.len() as i64,
        })
    }

    async fn read(&self, area: FileArea, filename: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let Ok(path) = safe_join(self.root(area), filename) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, area: FileArea, filename: &str) -> bool {
        match safe_join(self.root(area), filename) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    fn path_for(&self, area: FileArea, filename: &str) -> anyhow::Result<PathBuf> {
        safe_join(self.root(area), filename)
    }
}
