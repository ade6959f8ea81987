//! Pattern matcher - tags occurrences of catalog shapes in a settled generation.
//!
//! Each index in the assigned range is tried as the top-left anchor of every
//! catalog entry, in catalog order. A full match writes the entry's tag over
//! its whole footprint, so later entries win where footprints overlap at the
//! same anchor. Matches anchored at different indices (possibly on different
//! workers) may write the same overlay cell; the last store wins.

use super::{Board, ChunkRange, Overlay};
use crate::schema::{CatalogEntry, PatternCatalog};

/// Scan `range` of `board` for catalog shapes and tag matches into `overlay`.
///
/// `board` must not be written while this runs.
pub fn detect_patterns(
    board: &Board,
    overlay: &Overlay,
    catalog: &PatternCatalog,
    range: ChunkRange,
) {
    let width = board.width() as usize;

    for anchor in range.indices() {
        let x = anchor % width;
        for (tag, entry) in catalog.tagged() {
            if matches_at(board, entry, anchor, x) {
                tag_footprint(overlay, entry, anchor, width, tag);
            }
        }
    }
}

/// True if `entry` matches cell-for-cell with its top-left corner at `anchor`.
///
/// A footprint that runs past the right or bottom edge is a non-match.
fn matches_at(board: &Board, entry: &CatalogEntry, anchor: usize, anchor_x: usize) -> bool {
    let width = board.width() as usize;
    if anchor_x + entry.width as usize > width {
        return false;
    }

    for py in 0..entry.height {
        for px in 0..entry.width {
            let index = anchor + py as usize * width + px as usize;
            if index >= board.len() {
                return false;
            }
            if board.load(index) != entry.get(px, py) {
                return false;
            }
        }
    }
    true
}

fn tag_footprint(overlay: &Overlay, entry: &CatalogEntry, anchor: usize, width: usize, tag: u8) {
    for py in 0..entry.height as usize {
        for px in 0..entry.width as usize {
            overlay.store(anchor + py * width + px, tag);
        }
    }
}
