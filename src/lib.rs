//! Shared Life - Multithreaded Game of Life over shared atomic boards.
//!
//! This crate simulates Conway's Game of Life on a bounded 2D board. Every
//! generation is split into contiguous chunks processed by a fixed pool of
//! workers that share two double-buffered boards, followed by a concurrent
//! pass that tags known shapes in a separate overlay.
//!
//! # Architecture
//!
//! The crate is split into two modules:
//!
//! - `schema`: Configuration, seed and pattern catalog types
//! - `compute`: The simulation core (boards, partitioning, workers, pool)
//!
//! # Example
//!
//! ```rust,no_run
//! use shared_life::{
//!     schema::{PatternCatalog, Seed, SimulationConfig},
//!     compute::{Frame, WorkerPool},
//! };
//!
//! let config = SimulationConfig::default();
//! let mut pool = WorkerPool::from_seed(config, &Seed::default(), PatternCatalog::default())
//!     .expect("valid configuration");
//!
//! pool.run(100, &mut |frame: &Frame<'_>| {
//!     println!("generation {}: {} live", frame.generation, frame.board.live_count());
//! })
//! .unwrap();
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Board, Frame, FrameGate, FrameRenderer, Overlay, SimulationStats, WorkerPool};
pub use schema::{PatternCatalog, Seed, SeedPattern, SimulationConfig};
