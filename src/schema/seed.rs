//! Seed types for initializing Game of Life simulations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::PatternCatalog;

/// Seed description for simulation initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: SeedPattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: SeedPattern::Catalog {
                name: "r-pentomino".to_string(),
            },
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeedPattern {
    /// Explicit row-major 0/1 cells.
    Cells {
        width: u32,
        height: u32,
        cells: Vec<u8>,
    },
    /// A shape taken from the pattern catalog by name.
    Catalog { name: String },
    /// Random soup of the given size.
    Noise {
        width: u32,
        height: u32,
        /// Probability of a cell being alive (0.0-1.0).
        density: f64,
        /// Random seed.
        seed: u64,
    },
}

impl Seed {
    /// Seed from an explicit cell array.
    pub fn cells(width: u32, height: u32, cells: Vec<u8>) -> Self {
        Self {
            pattern: SeedPattern::Cells {
                width,
                height,
                cells,
            },
        }
    }

    /// Resolve the seed into a validated rectangular grid.
    pub fn generate(&self, catalog: &PatternCatalog) -> Result<SeedGrid, SeedError> {
        match &self.pattern {
            SeedPattern::Cells {
                width,
                height,
                cells,
            } => SeedGrid::new(*width, *height, cells.clone()),
            SeedPattern::Catalog { name } => {
                let entry = catalog
                    .by_name(name)
                    .ok_or_else(|| SeedError::UnknownPattern(name.clone()))?;
                SeedGrid::new(entry.width, entry.height, entry.cells.clone())
            }
            SeedPattern::Noise {
                width,
                height,
                density,
                seed,
            } => {
                if !(0.0..=1.0).contains(density) {
                    return Err(SeedError::InvalidDensity(*density));
                }
                let mut rng = StdRng::seed_from_u64(*seed);
                let count = *width as usize * *height as usize;
                let cells = (0..count).map(|_| rng.gen_bool(*density) as u8).collect();
                SeedGrid::new(*width, *height, cells)
            }
        }
    }
}

/// A validated rectangular array of 0/1 cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedGrid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl SeedGrid {
    /// Create a seed grid, checking the cell count against the declared shape.
    pub fn new(width: u32, height: u32, cells: Vec<u8>) -> Result<Self, SeedError> {
        if width == 0 || height == 0 {
            return Err(SeedError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(SeedError::CellCountMismatch {
                width,
                height,
                actual: cells.len(),
            });
        }
        if let Some(&value) = cells.iter().find(|&&c| c > 1) {
            return Err(SeedError::InvalidCell(value));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate `(x, y, value)` for every cell of the seed.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i as u32 % width, i as u32 / width, v))
    }
}

/// Seed validation errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Seed dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Seed declares {width}x{height} but has {actual} cells")]
    CellCountMismatch { width: u32, height: u32, actual: usize },
    #[error("Seed cell value {0} is not 0 or 1")]
    InvalidCell(u8),
    #[error("Seed density {0} must be within 0.0-1.0")]
    InvalidDensity(f64),
    #[error("No catalog pattern named '{0}'")]
    UnknownPattern(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_seed() {
        let seed = Seed::cells(3, 1, vec![1, 1, 1]);
        let grid = seed.generate(&PatternCatalog::default()).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 1));
        assert_eq!(grid.cells(), &[1, 1, 1]);
    }

    #[test]
    fn test_inconsistent_seed_rejected() {
        let seed = Seed::cells(2, 2, vec![1, 0, 1]);
        assert!(matches!(
            seed.generate(&PatternCatalog::default()),
            Err(SeedError::CellCountMismatch { actual: 3, .. })
        ));
        assert!(matches!(
            SeedGrid::new(1, 1, vec![7]),
            Err(SeedError::InvalidCell(7))
        ));
        assert!(matches!(
            SeedGrid::new(0, 3, vec![]),
            Err(SeedError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_catalog_seed() {
        let grid = Seed::default()
            .generate(&PatternCatalog::default())
            .unwrap();
        assert_eq!(grid.cells(), &[0, 1, 1, 1, 1, 0, 0, 1, 0]);

        let missing = Seed {
            pattern: SeedPattern::Catalog {
                name: "gosper".into(),
            },
        };
        assert!(matches!(
            missing.generate(&PatternCatalog::default()),
            Err(SeedError::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_noise_seed_is_deterministic() {
        let seed = Seed {
            pattern: SeedPattern::Noise {
                width: 16,
                height: 8,
                density: 0.5,
                seed: 42,
            },
        };
        let catalog = PatternCatalog::default();
        let a = seed.generate(&catalog).unwrap();
        let b = seed.generate(&catalog).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cells().len(), 128);
        assert!(a.cells().iter().any(|&c| c == 1));
    }

    #[test]
    fn test_seed_json() {
        let json = r#"{"pattern": {"type": "Cells", "width": 2, "height": 1, "cells": [1, 0]}}"#;
        let seed: Seed = serde_json::from_str(json).unwrap();
        let grid = seed.generate(&PatternCatalog::empty()).unwrap();
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 0)]);
    }
}
