use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::pdf_renderer::{PdfRenderError, PdfRenderer};

const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Pipes HTML into an external `wkhtmltopdf`-compatible binary.
pub struct WkhtmltopdfRenderer {
    binary: String,
}

impl WkhtmltopdfRenderer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, html: &str, output: &Path) -> Result<(), PdfRenderError> {
        let mut child = match Command::new(&self.binary)
            .arg("--quiet")
            .arg("--encoding")
            .arg("utf-8")
            .arg("-")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfRenderError::Unavailable(format!(
                    "{} not found",
                    self.binary
                )));
            }
            Err(e) => return Err(PdfRenderError::Failed(e.into())),
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| PdfRenderError::Failed(e.into()))?;
        }

        let out = child
            .wait_with_output()
            .await
            .map_err(|e| PdfRenderError::Failed(e.into()))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(PdfRenderError::Failed(anyhow::anyhow!(
                "{} exited with {}: {}",
                self.binary,
                out.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), PdfRenderError> {
        match tokio::time::timeout(RENDER_TIMEOUT, self.run(html, output)).await {
            Ok(result) => result,
            Err(_) => Err(PdfRenderError::Failed(anyhow::anyhow!(
                "{} timed out after {}s",
                self.binary,
                RENDER_TIMEOUT.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let renderer = WkhtmltopdfRenderer::new("arsip-no-such-pdf-engine");
        let err = renderer
            .render("<p>x</p>", &temp.path().join("x.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdfRenderError::Unavailable(_)));
    }
}
