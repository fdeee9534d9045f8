pub mod render;
pub mod up;
