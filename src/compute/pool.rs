//! Worker pool - orchestrates the per-generation phases across workers.
//!
//! Each generation runs three barrier-separated phases on a fixed rayon
//! thread pool built once at construction:
//!
//! 1. `step`: every worker computes the next generation for its range,
//!    reading the source board and writing the target board.
//! 2. `detect`: after the overlay is cleared, every worker scans its range
//!    of the settled target board for catalog shapes.
//! 3. `swap`: every worker exchanges its source/target roles.
//!
//! Between phases 2 and 3 the target board and overlay are handed to the
//! renderer; no worker runs during that call. Each phase is a single
//! `ThreadPool::scope`, which returns only once every spawned task finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace, warn};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use super::{Board, ChunkRange, Frame, FrameRenderer, Overlay, SimulationWorker, partition};
use crate::schema::{ConfigError, PatternCatalog, Seed, SeedError, SeedGrid, SimulationConfig};

/// Result of a call to [`WorkerPool::run_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A generation finished; carries the new generation number.
    Completed(u64),
    /// The run was cancelled; no further phases are issued.
    Cancelled,
}

/// Construction errors. Returned before any worker thread exists.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid seed: {0}")]
    Seed(#[from] SeedError),
    #[error("Failed to build worker thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Coordinator owning the workers, the shared buffers and the thread pool.
pub struct WorkerPool {
    config: SimulationConfig,
    pool: ThreadPool,
    workers: Vec<SimulationWorker>,
    ranges: Vec<ChunkRange>,
    /// Most recently completed generation (the seed before the first step).
    front: Board,
    /// Buffer the next generation is written into.
    back: Board,
    overlay: Overlay,
    catalog: Arc<PatternCatalog>,
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Create a pool with the seed grid centered on a fresh board.
    pub fn new(
        config: SimulationConfig,
        seed: &SeedGrid,
        catalog: PatternCatalog,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let width = config.width;
        let height = config.height;
        let worker_count = config.resolved_workers();

        let ranges = partition(config.cell_count(), worker_count);
        let idle = ranges.iter().filter(|r| r.is_empty()).count();
        if idle > 0 {
            warn!(
                "{} of {} workers have no cells to process on a {}x{} board",
                idle, worker_count, width, height
            );
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("life-worker-{}", i))
            .build()?;

        let front = Board::from_seed(width, height, seed);
        let back = Board::new(width, height);
        let overlay = Overlay::new(width, height);
        let catalog = Arc::new(catalog);

        let workers = (0..worker_count)
            .map(|id| SimulationWorker::new(id, front.clone(), back.clone(), Arc::clone(&catalog)))
            .collect();

        info!(
            "Worker pool ready: {}x{} board, {} workers, {} catalog patterns, {} live seed cells",
            width,
            height,
            worker_count,
            catalog.len(),
            front.live_count()
        );

        Ok(Self {
            config,
            pool,
            workers,
            ranges,
            front,
            back,
            overlay,
            catalog,
            generation: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a pool from a seed description, resolving it against the catalog.
    pub fn from_seed(
        config: SimulationConfig,
        seed: &Seed,
        catalog: PatternCatalog,
    ) -> Result<Self, SimulationError> {
        let grid = seed.generate(&catalog)?;
        Self::new(config, &grid, catalog)
    }

    /// Run one generation: step, clear overlay, detect, render, swap.
    ///
    /// Returns [`GenerationOutcome::Cancelled`] without touching the boards
    /// if cancellation was requested; a cancellation observed between
    /// phases stops before the next phase. Renderer errors are returned
    /// before the swap, leaving the generation counter unchanged.
    pub fn run_generation<R: FrameRenderer>(
        &mut self,
        renderer: &mut R,
    ) -> Result<GenerationOutcome, R::Error> {
        if self.is_cancelled() {
            return Ok(GenerationOutcome::Cancelled);
        }

        trace!("generation {}: step", self.generation + 1);
        self.fan_out(|worker, range| worker.step(range));

        if self.is_cancelled() {
            return Ok(GenerationOutcome::Cancelled);
        }

        trace!("generation {}: detect", self.generation + 1);
        self.overlay.clear();
        let overlay = &self.overlay;
        self.fan_out(|worker, range| worker.detect(range, overlay));

        renderer.render(&Frame {
            generation: self.generation + 1,
            board: &self.back,
            overlay: &self.overlay,
            catalog: &self.catalog,
        })?;

        if self.is_cancelled() {
            return Ok(GenerationOutcome::Cancelled);
        }

        trace!("generation {}: swap", self.generation + 1);
        self.swap_all();
        std::mem::swap(&mut self.front, &mut self.back);

        self.generation += 1;
        debug!(
            "generation {} complete: {} live cells",
            self.generation,
            self.front.live_count()
        );
        Ok(GenerationOutcome::Completed(self.generation))
    }

    /// Run up to `generations` generations back to back.
    ///
    /// Stops early on cancellation and returns the number of completed
    /// generations. The worker threads stay alive until the pool is dropped
    /// or [`shutdown`](Self::shutdown) is called.
    pub fn run<R: FrameRenderer>(
        &mut self,
        generations: u64,
        renderer: &mut R,
    ) -> Result<u64, R::Error> {
        let mut completed = 0;
        while completed < generations {
            match self.run_generation(renderer)? {
                GenerationOutcome::Completed(_) => completed += 1,
                GenerationOutcome::Cancelled => break,
            }
        }
        Ok(completed)
    }

    /// Issue one phase to every worker over its range and wait for all of them.
    fn fan_out<F>(&self, task: F)
    where
        F: Fn(&SimulationWorker, ChunkRange) + Sync,
    {
        let task = &task;
        self.pool.scope(|s| {
            for (worker, &range) in self.workers.iter().zip(&self.ranges) {
                s.spawn(move |_| task(worker, range));
            }
        });
    }

    /// Swap source/target on every worker and wait for all of them.
    fn swap_all(&mut self) {
        let workers = &mut self.workers;
        self.pool.scope(|s| {
            for worker in workers.iter_mut() {
                s.spawn(move |_| worker.swap());
            }
        });
    }

    /// Handle that cancels the run when set to `true`.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Request cancellation. In-flight phases finish; no new phase starts.
    ///
    /// Threads are only released by [`shutdown`](Self::shutdown) or drop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Stop the run and release the worker threads.
    ///
    /// Consumes the pool; dropping the rayon pool joins its threads.
    pub fn shutdown(self) {
        self.cancel();
        info!(
            "Worker pool shut down after {} generations",
            self.generation
        );
    }

    /// Board holding the most recently completed generation.
    pub fn current(&self) -> &Board {
        &self.front
    }

    /// Pattern tags of the most recently completed generation.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn workers(&self) -> &[SimulationWorker] {
        &self.workers
    }

    /// Ranges assigned to each worker, in worker order.
    pub fn ranges(&self) -> &[ChunkRange] {
        &self.ranges
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::NullRenderer;
    use crate::schema::CatalogEntry;

    fn config(width: u32, height: u32, workers: usize) -> SimulationConfig {
        SimulationConfig {
            width,
            height,
            workers: Some(workers),
            framerate: 0.0,
        }
    }

    fn glider() -> SeedGrid {
        SeedGrid::new(3, 3, vec![0, 1, 0, 0, 0, 1, 1, 1, 1]).unwrap()
    }

    fn live_cells(board: &Board) -> Vec<(u32, u32)> {
        let mut cells = Vec::new();
        for y in 0..board.height() {
            for x in 0..board.width() {
                if board.get(x, y) == 1 {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_glider_translates_after_four_generations() {
        let mut pool = WorkerPool::new(config(10, 10, 1), &glider(), PatternCatalog::default()).unwrap();
        let initial = live_cells(pool.current());
        assert_eq!(initial.len(), 5);

        let done = pool.run(4, &mut NullRenderer).unwrap();
        assert_eq!(done, 4);
        assert_eq!(pool.generation(), 4);

        let expected: Vec<(u32, u32)> = initial.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(live_cells(pool.current()), expected);
    }

    #[test]
    fn test_worker_count_does_not_change_result() {
        let seed = Seed {
            pattern: crate::schema::SeedPattern::Noise {
                width: 24,
                height: 20,
                density: 0.35,
                seed: 7,
            },
        };
        let catalog = PatternCatalog::default();
        let grid = seed.generate(&catalog).unwrap();

        let mut single = WorkerPool::new(config(32, 24, 1), &grid, catalog.clone()).unwrap();
        let mut many = WorkerPool::new(config(32, 24, 5), &grid, catalog).unwrap();

        for _ in 0..12 {
            single.run_generation(&mut NullRenderer).unwrap();
            many.run_generation(&mut NullRenderer).unwrap();
            assert_eq!(single.current().snapshot(), many.current().snapshot());
        }
    }

    #[test]
    fn test_more_workers_than_cells() {
        let seed = SeedGrid::new(2, 2, vec![1, 1, 1, 1]).unwrap();
        let mut pool = WorkerPool::new(config(2, 2, 8), &seed, PatternCatalog::default()).unwrap();
        assert_eq!(pool.worker_count(), 8);
        assert!(pool.ranges()[4..].iter().all(|r| r.is_empty()));

        pool.run(3, &mut NullRenderer).unwrap();
        assert_eq!(pool.current().snapshot(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_renderer_sees_new_generation_and_overlay() {
        // Block is a still life; the overlay must tag it every frame.
        let seed = SeedGrid::new(2, 2, vec![1, 1, 1, 1]).unwrap();
        let mut pool = WorkerPool::new(config(6, 6, 3), &seed, PatternCatalog::default()).unwrap();
        let block_tag = pool
            .catalog()
            .tagged()
            .find(|(_, e)| e.name == "block")
            .unwrap()
            .0;

        let mut frames = Vec::new();
        let mut renderer = |frame: &Frame<'_>| {
            frames.push((frame.generation, frame.board.live_count(), frame.overlay.tagged_count()));
            assert_eq!(frame.overlay.load(frame.board.idx(2, 2)), block_tag);
        };
        pool.run(3, &mut renderer).unwrap();

        assert_eq!(frames, vec![(1, 4, 4), (2, 4, 4), (3, 4, 4)]);
    }

    #[test]
    fn test_overlay_cleared_each_generation() {
        // A blinker alternates orientation; the vertical phase has no
        // matching catalog entry, so its overlay must be empty.
        let seed = SeedGrid::new(3, 1, vec![1, 1, 1]).unwrap();
        let catalog = PatternCatalog::new(vec![CatalogEntry::from_rows("bar", &["OOO"], None)]).unwrap();
        let mut pool = WorkerPool::new(config(5, 5, 2), &seed, catalog).unwrap();

        let mut tagged = Vec::new();
        pool.run(4, &mut |frame: &Frame<'_>| tagged.push(frame.overlay.tagged_count()))
            .unwrap();
        assert_eq!(tagged, vec![0, 3, 0, 3]);
    }

    #[test]
    fn test_swap_alternates_worker_buffers() {
        let mut pool = WorkerPool::new(config(4, 4, 2), &glider(), PatternCatalog::empty()).unwrap();
        let a = pool.current().clone();
        assert!(pool.workers().iter().all(|w| w.source().shares_buffer(&a)));

        pool.run_generation(&mut NullRenderer).unwrap();
        assert!(pool.workers().iter().all(|w| w.target().shares_buffer(&a)));
        assert!(pool.workers()[0].source().shares_buffer(pool.current()));

        pool.run_generation(&mut NullRenderer).unwrap();
        assert!(pool.workers().iter().all(|w| w.source().shares_buffer(&a)));
        assert!(pool.current().shares_buffer(&a));
    }

    #[test]
    fn test_cancellation_stops_run() {
        let mut pool = WorkerPool::new(config(8, 8, 2), &glider(), PatternCatalog::default()).unwrap();
        let handle = pool.cancel_handle();

        let mut count = 0;
        let done = pool
            .run(10, &mut |_: &Frame<'_>| {
                count += 1;
                if count == 2 {
                    handle.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        // Cancelled after rendering generation 2, before its swap.
        assert_eq!(done, 1);
        assert_eq!(pool.generation(), 1);
        assert_eq!(
            pool.run_generation(&mut NullRenderer).unwrap(),
            GenerationOutcome::Cancelled
        );
        pool.shutdown();
    }

    #[test]
    fn test_cancel_before_run_issues_no_phase() {
        let mut pool = WorkerPool::new(config(8, 8, 2), &glider(), PatternCatalog::default()).unwrap();
        let before = pool.current().snapshot();
        pool.cancel();

        let mut rendered = 0;
        let done = pool.run(5, &mut |_: &Frame<'_>| rendered += 1).unwrap();
        assert_eq!(done, 0);
        assert_eq!(rendered, 0);
        assert_eq!(pool.current().snapshot(), before);
        assert!(pool.is_cancelled());
        pool.shutdown();
    }

    #[test]
    fn test_invalid_construction() {
        let catalog = PatternCatalog::default();
        assert!(matches!(
            WorkerPool::new(config(0, 4, 1), &glider(), catalog.clone()),
            Err(SimulationError::Config(ConfigError::InvalidDimensions { .. }))
        ));
        assert!(matches!(
            WorkerPool::new(config(4, 4, 0), &glider(), catalog.clone()),
            Err(SimulationError::Config(ConfigError::InvalidWorkerCount))
        ));
        let bad_seed = Seed::cells(2, 2, vec![1]);
        assert!(matches!(
            WorkerPool::from_seed(config(4, 4, 1), &bad_seed, catalog),
            Err(SimulationError::Seed(SeedError::CellCountMismatch { .. }))
        ));
    }
}
