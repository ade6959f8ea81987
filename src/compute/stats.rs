//! Simulation statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::Frame;

/// Per-pattern tag count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    pub name: String,
    pub tag: u8,
    /// Overlay cells carrying this tag.
    pub cells: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStats {
    pub generation: u64,
    pub live_cells: usize,
    pub tagged_cells: usize,
    pub patterns: Vec<PatternCount>,
}

impl SimulationStats {
    /// Compute statistics from a rendered frame.
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        let mut per_tag = vec![0usize; frame.catalog.len() + 1];
        let mut live_cells = 0;
        let mut tagged_cells = 0;

        for i in 0..frame.board.len() {
            if frame.board.load(i) != 0 {
                live_cells += 1;
            }
            let tag = frame.overlay.load(i) as usize;
            if tag != 0 {
                tagged_cells += 1;
                if let Some(count) = per_tag.get_mut(tag) {
                    *count += 1;
                }
            }
        }

        let patterns = frame
            .catalog
            .tagged()
            .map(|(tag, entry)| PatternCount {
                name: entry.name.clone(),
                tag,
                cells: per_tag[tag as usize],
            })
            .collect();

        Self {
            generation: frame.generation,
            live_cells,
            tagged_cells,
            patterns,
        }
    }
}

impl std::fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "generation {}: {} live, {} tagged",
            self.generation, self.live_cells, self.tagged_cells
        )?;
        for p in self.patterns.iter().filter(|p| p.cells > 0) {
            write!(f, ", {}={}", p.name, p.cells)?;
        }
        Ok(())
    }
}
