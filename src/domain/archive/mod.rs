pub mod document;
pub mod naming;
