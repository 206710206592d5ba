mod disabled;
mod wkhtmltopdf;

pub use disabled::DisabledPdfRenderer;
pub use wkhtmltopdf::WkhtmltopdfRenderer;

use std::sync::Arc;

use crate::application::ports::pdf_renderer::PdfRenderer;

/// `None` means PDF output is switched off.
pub fn build_pdf_renderer(engine: Option<&str>) -> Arc<dyn PdfRenderer> {
    match engine {
        Some(binary) => {
            tracing::info!(engine = %binary, "pdf_engine_configured");
            Arc::new(WkhtmltopdfRenderer::new(binary))
        }
        None => {
            tracing::info!("pdf_engine_disabled");
            Arc::new(DisabledPdfRenderer)
        }
    }
}
