//! Frame gate - decides when the caller should advance a generation.
//!
//! The simulation core never sleeps or reads a clock; the caller owns a
//! gate, asks it whether enough time has elapsed, and only then calls
//! [`WorkerPool::run_generation`](super::WorkerPool::run_generation).

use std::time::{Duration, Instant};

/// Timestamp-delta gate for a target framerate.
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameGate {
    /// Gate admitting at most `framerate` frames per second.
    ///
    /// A non-positive framerate admits every frame. A framerate too small
    /// for its interval to fit in a `Duration` saturates to `Duration::MAX`.
    pub fn new(framerate: f32) -> Self {
        let interval = if framerate > 0.0 {
            Duration::try_from_secs_f64(1.0 / framerate as f64).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            interval,
            last: None,
        }
    }

    /// Minimum time between admitted frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Admit a frame at `now` if the interval has elapsed since the last one.
    ///
    /// The first call always admits.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the next frame would be admitted.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Forget the last admitted frame.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
