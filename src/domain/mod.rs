pub mod archive;
pub mod letters;
