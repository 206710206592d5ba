use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct ArchivedDocument {
    pub id: i64,
    pub archive_name: String,
    pub document_name: String,
    pub id_number: Option<String>,
    pub category: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewArchivedDocument {
    pub archive_name: String,
    pub document_name: String,
    pub id_number: Option<String>,
    pub category: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct DocumentHit {
    pub archive_name: String,
    pub document_name: String,
    pub category: String,
}
