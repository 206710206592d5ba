use std::sync::Arc;

use crate::application::ports::archive_repository::ArchiveRepository;
use crate::application::ports::letter_repository::LetterRepository;
use crate::application::ports::pdf_renderer::PdfRenderer;
use crate::application::ports::storage_port::StoragePort;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::archive_repository_sqlx::SqlxArchiveRepository;
use crate::infrastructure::db::repositories::letter_repository_sqlx::SqlxLetterRepository;
use crate::infrastructure::pdf::build_pdf_renderer;
use crate::infrastructure::storage::port_impl::FsStoragePort;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    pool: DbPool,
    archive_repo: Arc<dyn ArchiveRepository>,
    letter_repo: Arc<dyn LetterRepository>,
    storage_port: Arc<dyn StoragePort>,
    pdf_renderer: Arc<dyn PdfRenderer>,
}

impl AppServices {
    pub fn new(
        pool: DbPool,
        archive_repo: Arc<dyn ArchiveRepository>,
        letter_repo: Arc<dyn LetterRepository>,
        storage_port: Arc<dyn StoragePort>,
        pdf_renderer: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            pool,
            archive_repo,
            letter_repo,
            storage_port,
            pdf_renderer,
        }
    }

    /// Wires the SQLite repositories, the filesystem storage and the PDF engine
    /// named in `cfg`. Creates the archive and generated directories.
    pub async fn from_config(cfg: &Config, pool: DbPool) -> anyhow::Result<Self> {
        let storage = FsStoragePort::new(&cfg.archive_dir, &cfg.generated_dir);
        storage.ensure_dirs().await?;
        Ok(Self::new(
            pool.clone(),
            Arc::new(SqlxArchiveRepository::new(pool.clone())),
            Arc::new(SqlxLetterRepository::new(pool)),
            Arc::new(storage),
            build_pdf_renderer(cfg.pdf_engine.as_deref()),
        ))
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn pool(&self) -> DbPool {
        self.services.pool.clone()
    }

    pub fn archive_repo(&self) -> Arc<dyn ArchiveRepository> {
        self.services.archive_repo.clone()
    }

    pub fn letter_repo(&self) -> Arc<dyn LetterRepository> {
        self.services.letter_repo.clone()
    }

    pub fn storage_port(&self) -> Arc<dyn StoragePort> {
        self.services.storage_port.clone()
    }

    pub fn pdf_renderer(&self) -> Arc<dyn PdfRenderer> {
        self.services.pdf_renderer.clone()
    }
}
