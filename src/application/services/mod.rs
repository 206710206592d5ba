pub mod letter_render;
