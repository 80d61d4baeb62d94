//! Floating digital specks
//!
//! Particles bounce off the surface edges and drift in opacity with the clock.
//! With a finite lifetime they respawn in place of dying: the slot is reused,
//! the fields are reset.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::frame::{Bounds, Frame};
use crate::consts::{DEPTH_MAX, PARTICLE_OPACITY_DRIFT, PARTICLE_OPACITY_FREQ};
use crate::settings::{ParticleConfig, Span};

/// Lifetime countdown in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub life: u32,
    pub max_life: u32,
}

impl Lifetime {
    pub fn new(max_life: u32) -> Self {
        let max_life = max_life.max(1);
        Self {
            life: max_life,
            max_life,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// Clamp band for `opacity`
    pub band: Span,
    pub z: Option<f32>,
    pub lifetime: Option<Lifetime>,
    /// Number of times this slot has been respawned
    pub generation: u32,
}

impl Particle {
    /// Spawn with randomized parameters from the config
    pub fn spawn<R: Rng + ?Sized>(config: &ParticleConfig, bounds: Bounds, rng: &mut R) -> Self {
        let lifetime = config.lifetime.map(|(lo, hi)| {
            let span = Span::new(lo as f32, hi.max(lo) as f32);
            Lifetime::new(span.sample(rng).round() as u32)
        });
        Self {
            pos: random_position(bounds, rng),
            vel: Vec2::new(config.velocity.sample(rng), config.velocity.sample(rng)),
            size: config.size.sample(rng),
            opacity: config.opacity_band.clamp(config.opacity.sample(rng)),
            band: config.opacity_band,
            z: config.depth.then(|| rng.random::<f32>() * DEPTH_MAX),
            lifetime,
            generation: 0,
        }
    }

    /// Radius after depth perspective (far particles are smaller)
    pub fn apparent_size(&self) -> f32 {
        match self.z {
            Some(z) => self.size * (1.0 - 0.5 * z / DEPTH_MAX),
            None => self.size,
        }
    }

    fn respawn<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) {
        self.pos = random_position(bounds, rng);
        if let Some(z) = self.z.as_mut() {
            *z = rng.random::<f32>() * DEPTH_MAX;
        }
        if let Some(lifetime) = self.lifetime.as_mut() {
            lifetime.life = lifetime.max_life;
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Entity for Particle {
    fn advance<R: Rng + ?Sized>(&mut self, frame: &Frame, rng: &mut R) {
        let bounds = frame.bounds;

        self.pos += self.vel;
        let (x, vx) = crate::reflect_into(self.pos.x, self.vel.x, bounds.width);
        let (y, vy) = crate::reflect_into(self.pos.y, self.vel.y, bounds.height);
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::new(vx, vy);

        self.opacity += crate::pulse(
            0.0,
            PARTICLE_OPACITY_DRIFT,
            frame.time,
            PARTICLE_OPACITY_FREQ,
            0.0,
        );
        self.opacity = self.band.clamp(self.opacity);

        let expired = match self.lifetime.as_mut() {
            Some(lifetime) => {
                lifetime.life = lifetime.life.saturating_sub(1);
                lifetime.life == 0
            }
            None => false,
        };
        if expired {
            self.respawn(bounds, rng);
        }
    }
}

fn random_position<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * bounds.width,
        rng.random::<f32>() * bounds.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn frame(time: u64) -> Frame {
        Frame::new(time, Bounds::new(800, 600))
    }

    #[test]
    fn test_spawn_respects_config_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = ParticleConfig::default();
        for _ in 0..200 {
            let p = Particle::spawn(&config, Bounds::new(800, 600), &mut rng);
            assert!(Bounds::new(800, 600).contains(p.pos));
            assert!(config.size.contains(p.size));
            assert!(config.opacity_band.contains(p.opacity));
            assert!(config.velocity.contains(p.vel.x));
            assert!(p.z.is_none());
            assert!(p.lifetime.is_none());
        }
    }

    #[test]
    fn test_bounce_flips_velocity() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = Particle::spawn(&ParticleConfig::default(), Bounds::new(800, 600), &mut rng);
        p.pos = Vec2::new(799.9, 0.1);
        p.vel = Vec2::new(0.25, -0.25);
        p.advance(&frame(1), &mut rng);
        assert!(p.vel.x < 0.0);
        assert!(p.vel.y > 0.0);
        assert!(Bounds::new(800, 600).contains(p.pos));
    }

    #[test]
    fn test_opacity_clamped_to_band() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::spawn(&ParticleConfig::default(), Bounds::new(800, 600), &mut rng);
        p.opacity = 5.0;
        p.advance(&frame(10), &mut rng);
        assert!(p.opacity <= 0.7);
        p.opacity = -1.0;
        p.advance(&frame(11), &mut rng);
        assert!(p.opacity >= 0.1);
    }

    #[test]
    fn test_lifetime_respawns_on_exhausting_call() {
        let mut rng = Pcg32::seed_from_u64(4);
        let config = ParticleConfig {
            lifetime: Some((5, 5)),
            ..ParticleConfig::default()
        };
        let mut p = Particle::spawn(&config, Bounds::new(800, 600), &mut rng);
        assert_eq!(p.lifetime, Some(Lifetime::new(5)));

        for t in 1..5 {
            p.advance(&frame(t), &mut rng);
            assert_eq!(p.lifetime.map(|l| l.life), Some(5 - t as u32));
            assert_eq!(p.generation, 0);
        }
        p.advance(&frame(5), &mut rng);
        assert_eq!(p.generation, 1);
        assert_eq!(p.lifetime.map(|l| l.life), Some(5));
    }

    #[test]
    fn test_depth_shrinks_far_particles() {
        let mut rng = Pcg32::seed_from_u64(5);
        let config = ParticleConfig {
            depth: true,
            ..ParticleConfig::default()
        };
        let mut p = Particle::spawn(&config, Bounds::new(800, 600), &mut rng);
        p.size = 2.0;
        p.z = Some(DEPTH_MAX);
        assert!((p.apparent_size() - 1.0).abs() < 1e-6);
        p.z = Some(0.0);
        assert_eq!(p.apparent_size(), 2.0);
    }
}
