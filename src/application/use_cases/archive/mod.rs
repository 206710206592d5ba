pub mod add_document;
pub mod get_archived_file;
pub mod list_documents;
pub mod search_documents;
