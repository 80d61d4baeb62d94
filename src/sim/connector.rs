//! Fiber-optic connectors between entities
//!
//! A connector never owns or copies the entities it joins. It holds anchors
//! (indices into the scene's collections) and resolves them to live positions
//! each time it is drawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::core_shape::Core;
use super::frame::Frame;
use super::shard::Shard;
use crate::consts::CONNECTOR_PULSE_STEP;

/// Identity of a connectable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Shard(usize),
    Core,
}

/// Borrowed view of the entities anchors can refer to
#[derive(Debug, Clone, Copy)]
pub struct Anchors<'a> {
    pub shards: &'a [Shard],
    pub core: Option<&'a Core>,
}

impl Anchors<'_> {
    pub fn position(&self, anchor: Anchor) -> Option<Vec2> {
        match anchor {
            Anchor::Shard(i) => self.shards.get(i).map(|s| s.pos),
            Anchor::Core => self.core.map(|c| c.center),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub from: Anchor,
    pub to: Anchor,
    /// Position of the travelling pulse along the line, in [0, 1)
    pub pulse: f32,
}

/// A connector resolved against live entity positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub pulse: f32,
}

impl Link {
    /// Current position of the travelling pulse
    pub fn pulse_point(&self) -> Vec2 {
        self.from.lerp(self.to, self.pulse)
    }
}

impl Connector {
    pub fn new(from: Anchor, to: Anchor) -> Self {
        Self {
            from,
            to,
            pulse: 0.0,
        }
    }

    /// Connectors joining each consecutive pair of shards
    pub fn chain(shard_count: usize) -> Vec<Self> {
        (1..shard_count)
            .map(|i| Self::new(Anchor::Shard(i - 1), Anchor::Shard(i)))
            .collect()
    }

    /// Endpoints at the anchors' current positions; `None` if an anchor is gone
    pub fn resolve(&self, anchors: &Anchors<'_>) -> Option<Link> {
        Some(Link {
            from: anchors.position(self.from)?,
            to: anchors.position(self.to)?,
            pulse: self.pulse,
        })
    }
}

impl Entity for Connector {
    fn advance<R: Rng + ?Sized>(&mut self, _frame: &Frame, _rng: &mut R) {
        self.pulse = (self.pulse + CONNECTOR_PULSE_STEP).rem_euclid(1.0);
        if self.pulse >= 1.0 {
            self.pulse = 0.0;
        }
    }
}
