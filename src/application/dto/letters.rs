use crate::domain::letters::letter::{ArtifactKind, Letter};

#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub filename: String,
}

#[derive(Debug, Clone)]
pub struct CreatedLetterDto {
    pub letter: Letter,
    pub template_id: &'static str,
    /// HTML always comes first; a PDF follows when one was produced.
    pub artifacts: Vec<GeneratedArtifact>,
    pub preview_html: String,
    /// PDF was requested but the engine could not be used.
    pub pdf_warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArchivedLetterDto {
    pub letter: Letter,
    /// Artifacts of this letter that are still present on disk.
    pub artifacts: Vec<GeneratedArtifact>,
}
