//! Animation clock and per-frame snapshot

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Monotonic tick counter. Incremented once per drawn frame, never reset.
///
/// Consumers only feed it into periodic functions, so overflow is not handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Surface extent in pixels, snapshotted once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Nothing can be drawn on a zero-area surface (e.g. before layout)
    pub fn is_degenerate(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Everything an entity may read while advancing or painting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub time: u64,
    pub bounds: Bounds,
}

impl Frame {
    pub fn new(time: u64, bounds: Bounds) -> Self {
        Self { time, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = Clock::new();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(Bounds::new(0, 0).is_degenerate());
        assert!(Bounds::new(800, 0).is_degenerate());
        assert!(!Bounds::new(1, 1).is_degenerate());
        assert_eq!(Bounds::new(800, 600).center(), Vec2::new(400.0, 300.0));
    }
}
