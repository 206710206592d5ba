use async_trait::async_trait;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum PdfRenderError {
    #[error("pdf engine unavailable: {0}")]
    Unavailable(String),
    #[error("pdf rendering failed")]
    Failed(#[source] anyhow::Error),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Renders `html` into a PDF file at `output`.
    async fn render(&self, html: &str, output: &Path) -> Result<(), PdfRenderError>;
}
