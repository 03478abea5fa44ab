pub mod render;
pub mod usage;
