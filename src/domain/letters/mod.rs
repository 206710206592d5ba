pub mod letter;
pub mod template;
