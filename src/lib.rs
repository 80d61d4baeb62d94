//! Prism Backdrop - procedural glass-shard background for a portfolio page
//!
//! Core modules:
//! - `sim`: Deterministic entity simulation (shards, particles, core, rays, connectors)
//! - `renderer`: Surface abstraction, entity painters, canvas and recording backends
//! - `scene`: Per-frame orchestration (clock, update -> draw order, resize)
//! - `platform`: Frame drivers (browser requestAnimationFrame loop, headless loop)
//! - `settings`: Initialization-time configuration

pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{Scene, SceneSnapshot, StepOutcome};
pub use settings::{QualityPreset, SceneConfig};

use glam::Vec2;

/// Default tuning constants
pub mod consts {
    /// Depth axis runs from the screen plane (0) to the far plane (100)
    pub const DEPTH_MAX: f32 = 100.0;

    /// Connector pulse advance per tick (fraction of line length)
    pub const CONNECTOR_PULSE_STEP: f32 = 0.02;

    /// Particle opacity drift amplitude per tick
    pub const PARTICLE_OPACITY_DRIFT: f32 = 0.02;
    /// Particle opacity drift frequency (radians per tick)
    pub const PARTICLE_OPACITY_FREQ: f32 = 0.02;

    /// Spark opacity below which a spark is re-emitted at the beam tip
    pub const SPARK_RESPAWN_OPACITY: f32 = 0.05;

    /// Id of the canvas element the browser driver looks for
    pub const DEFAULT_CANVAS_ID: &str = "bg3d";
}

/// Bounded sinusoidal modulation: `base + amplitude * sin(time * frequency + phase)`.
///
/// The phase product is taken in f64 so very old clocks keep a smooth waveform.
#[inline]
pub fn pulse(base: f32, amplitude: f32, time: u64, frequency: f32, phase: f32) -> f32 {
    let angle = time as f64 * frequency as f64 + phase as f64;
    base + amplitude * angle.sin() as f32
}

/// Renormalize a depth value into [0, DEPTH_MAX].
///
/// Values already in range are returned unchanged, so this is idempotent.
/// Out-of-range values fold to `|z| % DEPTH_MAX`; non-finite input maps to 0.
#[inline]
pub fn normalize_depth(z: f32) -> f32 {
    use consts::DEPTH_MAX;
    if !z.is_finite() {
        return 0.0;
    }
    if (0.0..=DEPTH_MAX).contains(&z) {
        z
    } else {
        z.abs() % DEPTH_MAX
    }
}

/// Toroidal wrap of a single coordinate with a margin beyond each edge.
///
/// Leaving past `-margin` re-enters at `extent + margin` and vice versa.
#[inline]
pub fn wrap_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Bounce a coordinate off [0, extent]: the position is reflected back inside
/// and the velocity component points away from the edge it crossed.
#[inline]
pub fn reflect_into(pos: f32, vel: f32, extent: f32) -> (f32, f32) {
    if pos < 0.0 {
        ((-pos).min(extent), vel.abs())
    } else if pos > extent {
        ((2.0 * extent - pos).clamp(0.0, extent), -vel.abs())
    } else {
        (pos, vel)
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
