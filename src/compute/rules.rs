//! Birth/survival rule (B3/S23) and neighbor counting.

use super::Board;

/// Moore neighborhood offsets, excluding the cell itself.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count live neighbors of (x, y). Edges clip, there is no wraparound.
#[inline]
pub fn count_live_neighbors(board: &Board, x: u32, y: u32) -> u32 {
    let width = board.width() as i64;
    let height = board.height() as i64;
    let mut count = 0;

    for (dx, dy) in NEIGHBOR_OFFSETS {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx < 0 || nx >= width || ny < 0 || ny >= height {
            continue;
        }
        count += u32::from(board.get(nx as u32, ny as u32) != 0);
    }
    count
}

/// Next state of a cell given its current state and live neighbor count.
#[inline]
pub fn next_cell_state(alive: bool, neighbors: u32) -> bool {
    match (alive, neighbors) {
        (true, n) if n < 2 => false,
        (true, 2 | 3) => true,
        (true, _) => false,
        (false, 3) => true,
        (false, _) => false,
    }
}
