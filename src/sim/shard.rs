//! Floating glass shards (wedges)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::frame::{Bounds, Frame};
use crate::consts::DEPTH_MAX;
use crate::normalize_depth;
use crate::settings::ShardConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub pos: Vec2,
    /// Depth in [0, DEPTH_MAX]
    pub z: f32,
    pub vel: Vec2,
    pub vz: f32,
    pub size: f32,
    /// Radians; grows without bound, trig takes care of the wrap
    pub rotation: f32,
    pub spin: f32,
    pub hue: f32,
    pub lightness: f32,
}

impl Shard {
    pub fn spawn<R: Rng + ?Sized>(config: &ShardConfig, bounds: Bounds, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * bounds.width,
                rng.random::<f32>() * bounds.height,
            ),
            z: rng.random::<f32>() * DEPTH_MAX,
            vel: Vec2::new(config.velocity.sample(rng), config.velocity.sample(rng)),
            vz: config.depth_velocity.sample(rng),
            size: config.size.sample(rng),
            rotation: rng.random::<f32>() * std::f32::consts::TAU,
            spin: config.spin.sample(rng),
            hue: config.hue.sample(rng),
            lightness: config.lightness.sample(rng),
        }
    }

    /// Perspective scale: near shards (z = 0) are drawn at 60% size
    pub fn depth_scale(&self) -> f32 {
        0.6 + 0.4 * self.z / DEPTH_MAX
    }

    /// Outline of the wedge in local (unrotated) coordinates
    pub fn outline(&self) -> [Vec2; 4] {
        let s = self.size * self.depth_scale();
        [
            Vec2::new(-s, -s * 0.5),
            Vec2::new(s * 0.7, -s),
            Vec2::new(s, s),
            Vec2::new(-s * 0.8, s * 0.5),
        ]
    }
}

impl Entity for Shard {
    fn advance<R: Rng + ?Sized>(&mut self, frame: &Frame, _rng: &mut R) {
        let bounds = frame.bounds;
        self.pos += self.vel;
        self.z = normalize_depth(self.z + self.vz);
        self.rotation += self.spin;

        self.pos.x = crate::wrap_with_margin(self.pos.x, bounds.width, self.size);
        self.pos.y = crate::wrap_with_margin(self.pos.y, bounds.height, self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shard(rng: &mut Pcg32) -> Shard {
        Shard::spawn(&ShardConfig::default(), Bounds::new(800, 600), rng)
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let config = ShardConfig::default();
        for _ in 0..100 {
            let s = shard(&mut rng);
            assert!((0.0..=DEPTH_MAX).contains(&s.z));
            assert!(config.hue.contains(s.hue));
            assert!(config.size.contains(s.size));
            assert!(config.lightness.contains(s.lightness));
        }
    }

    #[test]
    fn test_wraps_toroidally_with_size_margin() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut s = shard(&mut rng);
        s.size = 30.0;
        s.pos = Vec2::new(-29.5, 300.0);
        s.vel = Vec2::new(-1.0, 0.0);
        s.advance(&Frame::new(1, Bounds::new(800, 600)), &mut rng);
        assert_eq!(s.pos.x, 830.0);

        s.pos = Vec2::new(400.0, 629.5);
        s.vel = Vec2::new(0.0, 1.0);
        s.advance(&Frame::new(2, Bounds::new(800, 600)), &mut rng);
        assert_eq!(s.pos.y, -30.0);
    }

    #[test]
    fn test_depth_renormalized_for_fast_movers() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut s = shard(&mut rng);
        s.z = 99.0;
        s.vz = 1234.5;
        s.advance(&Frame::new(1, Bounds::new(800, 600)), &mut rng);
        assert!((0.0..=DEPTH_MAX).contains(&s.z));
        s.vz = -5000.0;
        s.advance(&Frame::new(2, Bounds::new(800, 600)), &mut rng);
        assert!((0.0..=DEPTH_MAX).contains(&s.z));
    }

    #[test]
    fn test_outline_scales_with_depth() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut s = shard(&mut rng);
        s.size = 50.0;
        s.z = DEPTH_MAX;
        assert!(s.outline()[2].abs_diff_eq(Vec2::new(50.0, 50.0), 1e-4));
        s.z = 0.0;
        assert!(s.outline()[2].abs_diff_eq(Vec2::new(30.0, 30.0), 1e-4));
    }
}
