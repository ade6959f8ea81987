//! Configuration types for Game of Life simulation parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default playback framerate.
fn default_framerate() -> f32 {
    60.0
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Number of workers. `None` uses the available hardware parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Target generations per second. Zero or negative disables the gate.
    #[serde(default = "default_framerate")]
    pub framerate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            workers: None,
            framerate: default_framerate(),
        }
    }
}

impl SimulationConfig {
    /// Get total cell count (width * height).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Resolve the worker count, falling back to available parallelism.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Time between generations, `Some(ZERO)` when ungated.
    ///
    /// `None` if the interval does not fit in a `Duration`.
    pub fn frame_interval(&self) -> Option<Duration> {
        if self.framerate > 0.0 {
            Duration::try_from_secs_f64(1.0 / self.framerate as f64).ok()
        } else {
            Some(Duration::ZERO)
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkerCount);
        }
        if !self.framerate.is_finite() || self.frame_interval().is_none() {
            return Err(ConfigError::InvalidFramerate(self.framerate));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Board {width}x{height} exceeds the addressable cell count")]
    BoardTooLarge { width: u32, height: u32 },
    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,
    #[error("Framerate {0} is not finite or its frame interval is too long")]
    InvalidFramerate(f32),
}
