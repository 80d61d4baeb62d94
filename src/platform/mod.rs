//! Frame drivers
//!
//! A driver owns nothing but the loop: it calls [`Scene::step`] once per tick
//! and forwards resizes. A failed frame is logged and the loop keeps going.
//!
//! - `web`: requestAnimationFrame loop and window resize listener (wasm32)
//! - [`run_frames`]: fixed-count loop for headless runs and tests

#[cfg(target_arch = "wasm32")]
pub mod web;

use rand::Rng;

use crate::renderer::{Surface, SurfaceError};
use crate::scene::{Scene, StepOutcome};

/// Outcome counts of a driven run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub drawn: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl LoopStats {
    /// Fold one step result into the counts, logging failures
    pub fn record(&mut self, result: Result<StepOutcome, SurfaceError>) {
        match result {
            Ok(StepOutcome::Drawn) => self.drawn += 1,
            Ok(StepOutcome::Skipped) => self.skipped += 1,
            Err(e) => {
                self.failed += 1;
                log::warn!("Frame dropped: {}", e);
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.drawn + self.skipped + self.failed
    }
}

/// Drive `frames` ticks back to back
pub fn run_frames<S: Surface, R: Rng>(scene: &mut Scene<S, R>, frames: u64) -> LoopStats {
    let mut stats = LoopStats::default();
    for _ in 0..frames {
        stats.record(scene.step());
    }
    log::info!(
        "Ran {} frames: {} drawn, {} skipped, {} failed",
        stats.total(),
        stats.drawn,
        stats.skipped,
        stats.failed
    );
    stats
}
