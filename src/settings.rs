//! Scene configuration
//!
//! Everything here is read once at initialization. Every field has a default,
//! so a partial JSON document (e.g. from a `data-scene` attribute) is enough.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::renderer::{Color, GradientStop};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Entity count multiplier
    pub fn density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Whether the drifting grid texture is painted
    pub fn grid_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether entities get a blur glow (costly on canvas)
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Scale a configured count by the preset density
    pub fn scale(&self, count: usize) -> usize {
        (count as f32 * self.density()).round() as usize
    }
}

/// Largest pixel extent accepted for sizes, lengths, radii and offsets
const MAX_EXTENT: f32 = 4096.0;
/// Largest per-tick speed in pixels
const MAX_SPEED: f32 = 64.0;
/// Largest line width or blur radius in pixels
const MAX_STROKE: f32 = 256.0;
/// Hue angles are unbounded on canvas; this only rejects absurd values
const MAX_HUE: f32 = 3600.0;
const MAX_ENTITIES: usize = 2000;
const MAX_SPARKS: usize = 64;
const MAX_OVERLAY_RAYS: usize = 32;

const UNIT: Span = Span::new(0.0, 1.0);
const PERCENT: Span = Span::new(0.0, 100.0);
const HUE: Span = Span::symmetric(MAX_HUE);
const EXTENT: Span = Span::new(0.0, MAX_EXTENT);
const OFFSET: Span = Span::symmetric(MAX_EXTENT);
const STROKE: Span = Span::new(0.0, MAX_STROKE);

/// `value` clamped into `limit`, or `fallback` when it is not finite
fn finite_in(value: f32, fallback: f32, limit: Span) -> f32 {
    if value.is_finite() { limit.clamp(value) } else { fallback }
}

/// Closed sampling interval. Sampling never panics, even when `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric span around zero
    pub const fn symmetric(half: f32) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min.min(self.max) && value <= self.max.max(self.min)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }

    /// Both ends clamped into `limit`; `fallback` if either end is not finite
    pub fn sanitized(self, fallback: Span, limit: Span) -> Span {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return fallback;
        }
        Span::new(limit.clamp(self.min), limit.clamp(self.max))
    }
}

/// Parameters of a bounded sinusoid `base + amplitude * sin(t * frequency + phase)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Pulse {
    pub const fn new(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
        }
    }

    pub fn at(&self, time: u64, phase: f32) -> f32 {
        crate::pulse(self.base, self.amplitude, time, self.frequency, phase)
    }

    /// Range every output of [`Pulse::at`] falls in
    pub fn bounds(&self) -> Span {
        let a = self.amplitude.abs();
        Span::new(self.base - a, self.base + a)
    }

    /// A pulse whose every output lies in `limit`. The base is clamped first,
    /// then the amplitude shrinks to fit. Non-finite parameters give `fallback`.
    pub fn sanitized(self, fallback: Pulse, limit: Span) -> Pulse {
        if !(self.base.is_finite() && self.amplitude.is_finite() && self.frequency.is_finite()) {
            return fallback;
        }
        let base = limit.clamp(self.base);
        let a = self.amplitude.abs();
        if base - a >= limit.min && base + a <= limit.max {
            return Pulse::new(base, self.amplitude, self.frequency);
        }
        let room = (limit.max - base).min(base - limit.min).max(0.0);
        Pulse::new(base, self.amplitude.clamp(-room, room), self.frequency)
    }
}

/// Floating glass shards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardConfig {
    pub count: usize,
    pub size: Span,
    /// Per-axis planar velocity
    pub velocity: Span,
    pub depth_velocity: Span,
    /// Radians per tick
    pub spin: Span,
    pub hue: Span,
    pub lightness: Span,
    pub alpha: Pulse,
    pub stroke_alpha: Pulse,
    pub stroke_width: Pulse,
    pub glow_blur: Pulse,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            count: 12,
            size: Span::new(20.0, 60.0),
            velocity: Span::symmetric(0.75),
            depth_velocity: Span::symmetric(0.4),
            spin: Span::symmetric(0.015),
            hue: Span::new(210.0, 240.0),
            lightness: Span::new(50.0, 80.0),
            alpha: Pulse::new(0.7, 0.2, 0.01),
            stroke_alpha: Pulse::new(0.8, 0.2, 0.02),
            stroke_width: Pulse::new(1.5, 0.5, 0.03),
            glow_blur: Pulse::new(20.0, 10.0, 0.01),
        }
    }
}

/// Drifting digital specks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub velocity: Span,
    pub size: Span,
    /// Initial opacity
    pub opacity: Span,
    /// Opacity is clamped into this band after every advance
    pub opacity_band: Span,
    /// Give particles a depth coordinate (scales size when painted)
    pub depth: bool,
    /// Finite lifetime in ticks; `None` means particles live forever
    pub lifetime: Option<(u32, u32)>,
    pub hue: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 40,
            velocity: Span::symmetric(0.25),
            size: Span::new(0.5, 2.0),
            opacity: Span::new(0.2, 0.7),
            opacity_band: Span::new(0.1, 0.7),
            depth: false,
            lifetime: None,
            hue: 200.0,
        }
    }
}

/// The rotating hexagonal core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub enabled: bool,
    /// Center relative to the surface (0..1 on each axis)
    pub anchor: Vec2,
    pub radius: f32,
    /// Radians per tick
    pub spin: f32,
    pub hue: f32,
    pub glow: Pulse,
    pub strength: Pulse,
    /// Connectors from the core to the first N shards
    pub links: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            anchor: Vec2::new(0.5, 0.5),
            radius: 46.0,
            spin: 0.004,
            hue: 250.0,
            glow: Pulse::new(30.0, 12.0, 0.03),
            strength: Pulse::new(0.6, 0.25, 0.02),
            links: 3,
        }
    }
}

/// Energy beams radiating from the core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RayConfig {
    /// Number of evenly spaced angular slots
    pub count: usize,
    pub max_length: Span,
    /// Growth per tick
    pub speed: Span,
    pub sparks: usize,
    /// Spark opacity multiplier per tick
    pub spark_decay: f32,
    /// Spark drift back toward the core per tick
    pub spark_drift: f32,
    pub hue: f32,
    pub alpha: Pulse,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            count: 8,
            max_length: Span::new(180.0, 320.0),
            speed: Span::new(1.0, 3.0),
            sparks: 6,
            spark_decay: 0.94,
            spark_drift: 1.5,
            hue: 260.0,
            alpha: Pulse::new(0.35, 0.15, 0.04),
        }
    }
}

/// Fiber-optic connector lines and their travelling pulse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub hue: f32,
    pub line_alpha: f32,
    pub line_width: f32,
    pub dot_radius: Pulse,
    pub dot_lightness: Pulse,
    pub dot_alpha: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            hue: 200.0,
            line_alpha: 0.15,
            line_width: 0.8,
            dot_radius: Pulse::new(3.0, 2.0, 0.05),
            dot_lightness: Pulse::new(60.0, 20.0, 0.05),
            dot_alpha: 0.8,
        }
    }
}

/// Background void and drifting grid texture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub stops: Vec<GradientStop>,
    pub grid_spacing: f32,
    pub grid_alpha: Pulse,
    /// Grid cell wobble in pixels, phased by cell position
    pub grid_drift: Pulse,
    pub grid_hue: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Color::hex(0x0a0e27)),
                GradientStop::new(0.5, Color::hex(0x05080f)),
                GradientStop::new(1.0, Color::hex(0x000814)),
            ],
            grid_spacing: 100.0,
            grid_alpha: Pulse::new(0.03, 0.02, 0.001),
            grid_drift: Pulse::new(0.0, 5.0, 0.001),
            grid_hue: 200.0,
        }
    }
}

/// Cinematic light rays painted over everything
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub rays: usize,
    pub alpha: f32,
    pub hue: f32,
    /// Horizontal sway in pixels
    pub sway: Pulse,
    pub width: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            rays: 3,
            alpha: 0.08,
            hue: 260.0,
            sway: Pulse::new(0.0, 20.0, 0.002),
            width: 150.0,
        }
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub quality: QualityPreset,
    pub shards: ShardConfig,
    pub particles: ParticleConfig,
    pub core: CoreConfig,
    pub rays: RayConfig,
    pub links: LinkConfig,
    pub background: BackgroundConfig,
    pub overlay: OverlayConfig,
}

impl SceneConfig {
    /// Create a config from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document. Out-of-range values are
    /// pulled back into drawable ranges, see [`SceneConfig::sanitized`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp every value into a range the painters can draw. Non-finite
    /// numbers fall back to the defaults, counts are capped, gradient stop
    /// offsets are clamped to 0..1 and stops with unusable colors are dropped.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let Self {
            quality,
            shards,
            particles,
            core,
            rays,
            links,
            background,
            overlay,
        } = self;

        let shards = ShardConfig {
            count: shards.count.min(MAX_ENTITIES),
            size: shards.size.sanitized(d.shards.size, EXTENT),
            velocity: shards.velocity.sanitized(d.shards.velocity, Span::symmetric(MAX_SPEED)),
            depth_velocity: shards
                .depth_velocity
                .sanitized(d.shards.depth_velocity, Span::symmetric(crate::consts::DEPTH_MAX)),
            spin: shards.spin.sanitized(d.shards.spin, Span::symmetric(std::f32::consts::PI)),
            hue: shards.hue.sanitized(d.shards.hue, HUE),
            lightness: shards.lightness.sanitized(d.shards.lightness, PERCENT),
            alpha: shards.alpha.sanitized(d.shards.alpha, UNIT),
            stroke_alpha: shards.stroke_alpha.sanitized(d.shards.stroke_alpha, UNIT),
            stroke_width: shards.stroke_width.sanitized(d.shards.stroke_width, STROKE),
            glow_blur: shards.glow_blur.sanitized(d.shards.glow_blur, STROKE),
        };

        let particles = ParticleConfig {
            count: particles.count.min(MAX_ENTITIES),
            velocity: particles
                .velocity
                .sanitized(d.particles.velocity, Span::symmetric(MAX_SPEED)),
            size: particles.size.sanitized(d.particles.size, EXTENT),
            opacity: particles.opacity.sanitized(d.particles.opacity, UNIT),
            opacity_band: particles.opacity_band.sanitized(d.particles.opacity_band, UNIT),
            hue: finite_in(particles.hue, d.particles.hue, HUE),
            ..particles
        };

        let anchor = if core.anchor.is_finite() {
            core.anchor.clamp(Vec2::ZERO, Vec2::ONE)
        } else {
            d.core.anchor
        };
        let core = CoreConfig {
            anchor,
            radius: finite_in(core.radius, d.core.radius, EXTENT),
            spin: finite_in(core.spin, d.core.spin, Span::symmetric(std::f32::consts::PI)),
            hue: finite_in(core.hue, d.core.hue, HUE),
            glow: core.glow.sanitized(d.core.glow, STROKE),
            strength: core.strength.sanitized(d.core.strength, UNIT),
            ..core
        };

        let rays = RayConfig {
            count: rays.count.min(MAX_ENTITIES),
            max_length: rays.max_length.sanitized(d.rays.max_length, EXTENT),
            speed: rays.speed.sanitized(d.rays.speed, Span::new(0.0, MAX_SPEED)),
            sparks: rays.sparks.min(MAX_SPARKS),
            spark_decay: finite_in(rays.spark_decay, d.rays.spark_decay, UNIT),
            spark_drift: finite_in(rays.spark_drift, d.rays.spark_drift, Span::new(0.0, MAX_SPEED)),
            hue: finite_in(rays.hue, d.rays.hue, HUE),
            alpha: rays.alpha.sanitized(d.rays.alpha, UNIT),
        };

        let links = LinkConfig {
            hue: finite_in(links.hue, d.links.hue, HUE),
            line_alpha: finite_in(links.line_alpha, d.links.line_alpha, UNIT),
            line_width: finite_in(links.line_width, d.links.line_width, STROKE),
            dot_radius: links.dot_radius.sanitized(d.links.dot_radius, EXTENT),
            dot_lightness: links.dot_lightness.sanitized(d.links.dot_lightness, PERCENT),
            dot_alpha: finite_in(links.dot_alpha, d.links.dot_alpha, UNIT),
        };

        let stops = background
            .stops
            .into_iter()
            .filter(|stop| stop.offset.is_finite() && stop.color.is_finite())
            .map(|stop| GradientStop::new(UNIT.clamp(stop.offset), stop.color))
            .collect();
        let background = BackgroundConfig {
            stops,
            grid_spacing: finite_in(
                background.grid_spacing,
                d.background.grid_spacing,
                Span::new(8.0, MAX_EXTENT),
            ),
            grid_alpha: background.grid_alpha.sanitized(d.background.grid_alpha, UNIT),
            grid_drift: background.grid_drift.sanitized(d.background.grid_drift, OFFSET),
            grid_hue: finite_in(background.grid_hue, d.background.grid_hue, HUE),
        };

        let overlay = OverlayConfig {
            rays: overlay.rays.min(MAX_OVERLAY_RAYS),
            alpha: finite_in(overlay.alpha, d.overlay.alpha, UNIT),
            hue: finite_in(overlay.hue, d.overlay.hue, HUE),
            sway: overlay.sway.sanitized(d.overlay.sway, OFFSET),
            width: finite_in(overlay.width, d.overlay.width, EXTENT),
        };

        Self {
            quality,
            shards,
            particles,
            core,
            rays,
            links,
            background,
            overlay,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.quality.scale(self.shards.count)
    }

    pub fn particle_count(&self) -> usize {
        self.quality.scale(self.particles.count)
    }

    pub fn ray_count(&self) -> usize {
        if self.core.enabled { self.rays.count } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_match_glass_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.shard_count(), 12);
        assert_eq!(config.particle_count(), 40);
        assert_eq!(config.ray_count(), 8);
        assert_eq!(config.background.stops.len(), 3);
    }

    #[test]
    fn test_quality_scales_counts() {
        let low = SceneConfig::from_preset(QualityPreset::Low);
        assert_eq!(low.shard_count(), 6);
        assert_eq!(low.particle_count(), 20);
        assert!(!low.quality.grid_enabled());
        let high = SceneConfig::from_preset(QualityPreset::High);
        assert_eq!(high.shard_count(), 18);
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(
            r#"{ "quality": "High", "particles": { "count": 5, "lifetime": [60, 120] } }"#,
        )
        .unwrap();
        assert_eq!(config.quality, QualityPreset::High);
        assert_eq!(config.particles.count, 5);
        assert_eq!(config.particles.lifetime, Some((60, 120)));
        assert_eq!(config.shards.count, 12);
        assert!(config.core.enabled);
    }

    #[test]
    fn test_defaults_survive_sanitizing() {
        let d = SceneConfig::default();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::to_string(&d.sanitized()).unwrap(), json);
    }

    #[test]
    fn test_json_values_pulled_into_drawable_ranges() {
        let config = SceneConfig::from_json(
            r#"{
                "shards": { "count": 1000000, "size": { "min": 1e38, "max": 1e39 } },
                "links": { "line_width": -4 },
                "background": {
                    "stops": [
                        { "offset": -0.5, "color": { "Rgba": { "r": 0, "g": 0, "b": 0, "a": 1.0 } } },
                        { "offset": 1.5, "color": { "Rgba": { "r": 9, "g": 9, "b": 9, "a": 1.0 } } }
                    ]
                },
                "overlay": { "alpha": 3.0, "sway": { "base": 0, "amplitude": 1e39, "frequency": 0.1 } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.shards.count, MAX_ENTITIES);
        // 1e39 overflows f32, so the whole span falls back
        assert_eq!(config.shards.size, ShardConfig::default().size);
        assert_eq!(config.links.line_width, 0.0);
        let offsets: Vec<f32> = config.background.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 1.0]);
        assert_eq!(config.overlay.alpha, 1.0);
        assert_eq!(config.overlay.sway, OverlayConfig::default().sway);
    }

    #[test]
    fn test_pulse_sanitized_fits_limit() {
        let p = Pulse::new(0.9, 0.5, 0.01).sanitized(Pulse::new(0.5, 0.1, 0.01), UNIT);
        assert_eq!(p.base, 0.9);
        assert!((p.amplitude - 0.1).abs() < 1e-6);
        let bounds = p.bounds();
        assert!(bounds.min >= 0.0 && bounds.max <= 1.0 + 1e-6);

        let fallback = Pulse::new(0.5, 0.1, 0.01);
        assert_eq!(Pulse::new(f32::NAN, 0.1, 0.01).sanitized(fallback, UNIT), fallback);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SceneConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_span_sample_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(7);
        let span = Span::new(20.0, 60.0);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
        // Degenerate span never panics
        assert_eq!(Span::new(0.0, 0.0).sample(&mut rng), 0.0);
    }

    #[test]
    fn test_pulse_bounds() {
        let p = Pulse::new(20.0, -10.0, 0.01);
        assert_eq!(p.bounds(), Span::new(10.0, 30.0));
    }
}
