//! Stackbot search crate - exhaustive single-piece placement search with hold.

mod config;
mod solver;

pub use config::SolverConfig;
pub use solver::Solver;
