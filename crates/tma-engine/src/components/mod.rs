pub mod entity;
pub mod physics;
pub mod sprite;
pub mod transform;
