pub mod dashboard;
pub mod files;
pub mod letters;
