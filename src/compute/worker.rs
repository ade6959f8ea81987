//! Simulation worker - per-range generation step, pattern scan and buffer swap.

use std::sync::Arc;

use super::{Board, ChunkRange, Overlay, count_live_neighbors, detect_patterns, next_cell_state};
use crate::schema::PatternCatalog;

/// A unit of work on a fixed range of cells.
///
/// Holds shared handles to both boards; which one is the source and which
/// the target flips on every [`swap`](Self::swap).
#[derive(Debug, Clone)]
pub struct SimulationWorker {
    id: usize,
    source: Board,
    target: Board,
    catalog: Arc<PatternCatalog>,
}

impl SimulationWorker {
    pub fn new(id: usize, source: Board, target: Board, catalog: Arc<PatternCatalog>) -> Self {
        debug_assert_eq!(source.len(), target.len());
        Self {
            id,
            source,
            target,
            catalog,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Board read during [`step`](Self::step).
    pub fn source(&self) -> &Board {
        &self.source
    }

    /// Board written during [`step`](Self::step) and scanned during [`detect`](Self::detect).
    pub fn target(&self) -> &Board {
        &self.target
    }

    /// Compute the next generation for every cell in `range`.
    ///
    /// Reads only the source board and writes only the target board.
    pub fn step(&self, range: ChunkRange) {
        let width = self.source.width() as usize;

        for index in range.indices() {
            let x = index % width;
            let y = (index - x) / width;

            let alive = self.source.load(index) != 0;
            let neighbors = count_live_neighbors(&self.source, x as u32, y as u32);
            let next = next_cell_state(alive, neighbors);

            self.target.store(index, u8::from(next));
        }
    }

    /// Tag catalog shapes anchored in `range` of the target board.
    pub fn detect(&self, range: ChunkRange, overlay: &Overlay) {
        detect_patterns(&self.target, overlay, &self.catalog, range);
    }

    /// Exchange the source and target roles.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }
}
