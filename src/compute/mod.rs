//! Compute module - Concurrent Game of Life simulation core.

mod board;
mod gate;
mod matcher;
mod partition;
mod pool;
mod render;
mod rules;
mod stats;
mod worker;

pub use board::*;
pub use gate::*;
pub use matcher::*;
pub use partition::*;
pub use pool::*;
pub use render::*;
pub use rules::*;
pub use stats::*;
pub use worker::*;
