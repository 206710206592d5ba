use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::pdf_renderer::{PdfRenderError, PdfRenderer};

pub struct DisabledPdfRenderer;

#[async_trait]
impl PdfRenderer for DisabledPdfRenderer {
    async fn render(&self, _html: &str, _output: &Path) -> Result<(), PdfRenderError> {
        Err(PdfRenderError::Unavailable(
            "pdf output is disabled".to_string(),
        ))
    }
}
