//! Schema module - Configuration, seed and catalog types for Game of Life simulations.

mod catalog;
mod config;
mod seed;

pub use catalog::*;
pub use config::*;
pub use seed::*;
