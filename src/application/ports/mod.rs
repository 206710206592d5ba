pub mod archive_repository;
pub mod letter_repository;
pub mod pdf_renderer;
pub mod storage_port;
