use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Category values that mean "use the free-text override instead".
pub const OTHER_CATEGORY_TAGS: [&str; 2] = ["OTHER", "LAINNYA"];

/// Used when the uploader leaves the document name blank.
pub const UNNAMED_DOCUMENT: &str = "TANPA_NAMA";

static PATH_HOSTILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00]"#).expect("valid regex"));

/// Replaces path separators, wildcard characters and NUL with `-`.
pub fn neutralize_path_chars(raw: &str) -> String {
    PATH_HOSTILE.replace_all(raw, "-").into_owned()
}

/// Uppercase, spaces to underscores, hostile characters to `-`.
pub fn filename_part(raw: &str) -> String {
    neutralize_path_chars(&raw.trim().to_uppercase().replace(' ', "_"))
}

pub fn is_other_category(selected: &str) -> bool {
    OTHER_CATEGORY_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(selected.trim()))
}

/// Picks the category to store. An "other" selection takes the override text
/// (uppercased, underscored); a blank override keeps the selection itself.
pub fn resolve_category(selected: &str, other: Option<&str>) -> String {
    let selected = selected.trim();
    if is_other_category(selected) {
        if let Some(custom) = other.map(str::trim).filter(|s| !s.is_empty()) {
            return custom.to_uppercase().replace(' ', "_");
        }
    }
    selected.to_string()
}

/// Extension of the uploaded file including the leading dot, or empty.
pub fn original_extension(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(pos) => neutralize_path_chars(&base[pos..]),
    }
}

/// `<CATEGORY>_<NAME>_<YYYYMMDD_HHMMSS><.ext>`
pub fn archive_file_name(
    category: &str,
    document_name: &str,
    original_filename: &str,
    uploaded_at: NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}{}",
        filename_part(category),
        filename_part(document_name),
        uploaded_at.format("%Y%m%d_%H%M%S"),
        original_extension(original_filename)
    )
}
