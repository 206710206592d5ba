pub mod create_letter;
pub mod download_artifact;
pub mod get_letter;
pub mod search_letters;
