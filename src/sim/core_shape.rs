//! Rotating hexagonal core
//!
//! The core has no velocity. Its center follows the surface (anchored to a
//! relative position) and its glow/strength are recomputed from the clock.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::frame::{Bounds, Frame};
use crate::settings::CoreConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Core {
    /// Relative anchor (0..1 per axis)
    pub anchor: Vec2,
    /// Resolved pixel center
    pub center: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub spin: f32,
    pub hue: f32,
    /// Glow blur radius, derived each tick
    pub glow: f32,
    /// Fill strength (alpha), derived each tick
    pub strength: f32,
    #[serde(skip)]
    config: CoreConfig,
}

impl Core {
    pub fn new(config: &CoreConfig, bounds: Bounds) -> Self {
        let anchor = config.anchor.clamp(Vec2::ZERO, Vec2::ONE);
        Self {
            anchor,
            center: anchor * bounds.size(),
            radius: config.radius,
            rotation: 0.0,
            spin: config.spin,
            hue: config.hue,
            glow: config.glow.base,
            strength: config.strength.base,
            config: config.clone(),
        }
    }

    /// Hexagon vertices around the current center
    pub fn hexagon(&self, scale: f32) -> [Vec2; 6] {
        let r = self.radius * scale;
        std::array::from_fn(|i| {
            let theta = self.rotation + i as f32 * std::f32::consts::TAU / 6.0;
            self.center + crate::polar_to_cartesian(r, theta)
        })
    }
}

impl Entity for Core {
    fn advance<R: Rng + ?Sized>(&mut self, frame: &Frame, _rng: &mut R) {
        self.center = self.anchor * frame.bounds.size();
        self.rotation += self.spin;
        self.glow = self.config.glow.at(frame.time, 0.0);
        self.strength = self.config.strength.at(frame.time, std::f32::consts::FRAC_PI_3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_core_follows_surface_center() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut core = Core::new(&CoreConfig::default(), Bounds::new(0, 0));
        assert_eq!(core.center, Vec2::ZERO);
        core.advance(&Frame::new(1, Bounds::new(800, 600)), &mut rng);
        assert_eq!(core.center, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_glow_stays_within_pulse_bounds() {
        let mut rng = Pcg32::seed_from_u64(0);
        let config = CoreConfig::default();
        let mut core = Core::new(&config, Bounds::new(800, 600));
        let glow = config.glow.bounds();
        let strength = config.strength.bounds();
        for t in 0..2000 {
            core.advance(&Frame::new(t, Bounds::new(800, 600)), &mut rng);
            assert!(core.glow >= glow.min - 1e-4 && core.glow <= glow.max + 1e-4);
            assert!(core.strength >= strength.min - 1e-4 && core.strength <= strength.max + 1e-4);
        }
    }

    #[test]
    fn test_hexagon_vertices_on_circle() {
        let core = Core::new(&CoreConfig::default(), Bounds::new(800, 600));
        for v in core.hexagon(1.0) {
            assert!(((v - core.center).length() - core.radius).abs() < 1e-3);
        }
    }
}
