//! Shared board buffers.
//!
//! Both the cell boards and the pattern overlay are fixed-size byte grids
//! backed by an `Arc<[AtomicU8]>`. Cloning a handle shares the same buffer.
//! Every cell access is a single relaxed atomic operation; ordering between
//! phases is provided by the worker pool barrier, not by the buffers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::schema::SeedGrid;

/// Fixed-size shared byte grid.
#[derive(Debug, Clone)]
struct SharedCells {
    width: u32,
    height: u32,
    data: Arc<[AtomicU8]>,
}

impl SharedCells {
    fn zeroed(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let data: Arc<[AtomicU8]> = (0..len).map(|_| AtomicU8::new(0)).collect();
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    fn load(&self, index: usize) -> u8 {
        self.data[index].load(Ordering::Relaxed)
    }

    #[inline]
    fn store(&self, index: usize, value: u8) {
        self.data[index].store(value, Ordering::Relaxed);
    }

    fn clear(&self) {
        for cell in self.data.iter() {
            cell.store(0, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> Vec<u8> {
        self.data.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    fn shares_buffer(&self, other: &SharedCells) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Grid of live (1) / dead (0) cells for one generation.
#[derive(Debug, Clone)]
pub struct Board {
    cells: SharedCells,
}

impl Board {
    /// Create an all-dead board.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: SharedCells::zeroed(width, height),
        }
    }

    /// Create a board with the seed placed at its center.
    ///
    /// Seed cells that fall outside the board are dropped.
    pub fn from_seed(width: u32, height: u32, seed: &SeedGrid) -> Self {
        let board = Self::new(width, height);
        let start_x = (width as i64 - seed.width() as i64).div_euclid(2);
        let start_y = (height as i64 - seed.height() as i64).div_euclid(2);

        for (sx, sy, value) in seed.iter() {
            let x = start_x + sx as i64;
            let y = start_y + sy as i64;
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                continue;
            }
            board.set(x as u32, y as u32, value);
        }
        board
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.cells.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.cells.height
    }

    /// Total number of cells (width * height).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.data.is_empty()
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    pub fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    /// Atomically read the cell at a linear index.
    #[inline]
    pub fn load(&self, index: usize) -> u8 {
        self.cells.load(index)
    }

    /// Atomically write the cell at a linear index.
    #[inline]
    pub fn store(&self, index: usize, value: u8) {
        self.cells.store(index, value);
    }

    /// Cell value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.load(self.idx(x, y))
    }

    #[inline]
    pub fn set(&self, x: u32, y: u32, value: u8) {
        self.store(self.idx(x, y), value);
    }

    /// Reset every cell to dead.
    pub fn clear(&self) {
        self.cells.clear();
    }

    /// Copy the current cells into an owned vector.
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells.snapshot()
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells
            .data
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) != 0)
            .count()
    }

    /// True if both handles refer to the same underlying buffer.
    pub fn shares_buffer(&self, other: &Board) -> bool {
        self.cells.shares_buffer(&other.cells)
    }
}

/// Parallel grid of pattern tags. `0` means no pattern.
#[derive(Debug, Clone)]
pub struct Overlay {
    cells: SharedCells,
}

impl Overlay {
    /// Create an all-zero overlay.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: SharedCells::zeroed(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.cells.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.cells.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.data.is_empty()
    }

    /// Atomically read the tag at a linear index.
    #[inline]
    pub fn load(&self, index: usize) -> u8 {
        self.cells.load(index)
    }

    /// Atomically write a tag at a linear index.
    #[inline]
    pub fn store(&self, index: usize, tag: u8) {
        self.cells.store(index, tag);
    }

    /// Reset every tag to zero.
    pub fn clear(&self) {
        self.cells.clear();
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.cells.snapshot()
    }

    /// Number of cells carrying a non-zero tag.
    pub fn tagged_count(&self) -> usize {
        self.cells
            .data
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) != 0)
            .count()
    }
}
