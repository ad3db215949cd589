//! Host-side driver: owns the grid and current rule, and exposes the controls an
//! interactive front end binds to.

mod persistence;
mod state;

pub use state::Simulation;
