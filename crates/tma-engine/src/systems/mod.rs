pub mod movement;
pub mod render;
