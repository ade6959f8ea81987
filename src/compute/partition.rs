//! Chunk partitioning of linear cell indices across workers.

/// Half-open interval `[from, to)` of linear cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub from: usize,
    pub to: usize,
}

impl ChunkRange {
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "inverted range {}..{}", from, to);
        Self { from, to }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Iterate the indices in this range.
    #[inline]
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.from..self.to
    }
}

/// Split `total_cells` into `worker_count` contiguous ranges.
///
/// Every worker gets `total_cells / worker_count` cells and the first
/// `total_cells % worker_count` workers get one extra. Ranges are ordered by
/// worker index and cover `[0, total_cells)` exactly once; when there are
/// fewer cells than workers the trailing ranges are empty.
///
/// # Panics
///
/// Panics if `worker_count` is zero.
pub fn partition(total_cells: usize, worker_count: usize) -> Vec<ChunkRange> {
    assert!(worker_count > 0, "worker_count must be at least 1");

    let base = total_cells / worker_count;
    let remainder = total_cells % worker_count;

    let mut ranges = Vec::with_capacity(worker_count);
    let mut from = 0;
    for i in 0..worker_count {
        let to = from + base + usize::from(i < remainder);
        ranges.push(ChunkRange::new(from, to));
        from = to;
    }
    ranges
}
