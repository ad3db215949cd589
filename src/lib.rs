pub mod app;
pub mod model;

pub use app::Simulation;
