//! Deterministic animation simulation
//!
//! All entity state evolution lives here. This module must stay pure:
//! - One `advance` per entity per tick, driven by the frame snapshot
//! - Injected RNG only (respawns draw from it)
//! - No rendering or platform dependencies

pub mod connector;
pub mod core_shape;
pub mod frame;
pub mod particle;
pub mod ray;
pub mod shard;

pub use core_shape::Core;
pub use connector::{Anchor, Anchors, Connector, Link};
pub use frame::{Bounds, Clock, Frame};
pub use particle::{Lifetime, Particle};
pub use ray::{RayStream, Spark, SparkTrail};
pub use shard::Shard;

use rand::Rng;

/// Shared per-tick update contract of every animated entity
pub trait Entity {
    /// Advance one tick. Reads only the entity's own state, the frame snapshot
    /// and (for respawns) the RNG.
    fn advance<R: Rng + ?Sized>(&mut self, frame: &Frame, rng: &mut R);
}
