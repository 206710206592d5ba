use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::archive::naming::neutralize_path_chars;

/// Submitted form fields, keyed by field name.
pub type LetterPayload = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Letter {
    pub id: i64,
    pub letter_number: String,
    pub letter_type: String,
    pub applicant_name: String,
    pub applicant_id_number: Option<String>,
    pub purpose: String,
    pub raw_payload: String,
    pub created_at: NaiveDateTime,
}

impl Letter {
    /// Parsed form payload. A malformed stored payload yields an empty map.
    pub fn payload(&self) -> LetterPayload {
        serde_json::from_str(&self.raw_payload).unwrap_or_default()
    }
}

/// Everything needed to persist a letter except its number and id.
#[derive(Debug, Clone)]
pub struct LetterDraft {
    pub letter_type: String,
    pub applicant_name: String,
    pub applicant_id_number: Option<String>,
    pub purpose: String,
    pub raw_payload: String,
}

#[derive(Debug, Clone)]
pub struct LetterHit {
    pub id: i64,
    pub letter_number: String,
    pub applicant_name: String,
    pub letter_type: String,
}

/// `<TYPE_UPPER>/<YYYY-MM-DD>/<seq:03>`
pub fn format_letter_number(letter_type: &str, day: NaiveDate, seq: i64) -> String {
    format!(
        "{}/{}/{:03}",
        letter_type.trim().to_uppercase(),
        day.format("%Y-%m-%d"),
        seq
    )
}

/// Generated artifacts are named after the letter number with `/` replaced by
/// `_` and any other path-hostile character by `-`.
pub fn artifact_stem(letter_number: &str) -> String {
    neutralize_path_chars(&letter_number.replace('/', "_"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Html,
    Pdf,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Html => "html",
            ArtifactKind::Pdf => "pdf",
        }
    }

    pub fn file_name(self, letter_number: &str) -> String {
        format!("{}.{}", artifact_stem(letter_number), self.extension())
    }
}
