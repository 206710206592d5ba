pub mod archive_repository_sqlx;
pub mod letter_repository_sqlx;
