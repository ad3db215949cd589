pub mod color;
pub mod rule;
