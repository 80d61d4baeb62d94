//! Energy beams radiating from the core
//!
//! A beam grows outward from the core at a fixed angle until it reaches its
//! maximum length. Sparks are emitted at the tip and fall back toward the core
//! while fading; a faded spark is re-emitted at the current tip.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::frame::Frame;
use crate::consts::SPARK_RESPAWN_OPACITY;
use crate::settings::RayConfig;

/// A trailing spark, positioned by its distance from the core along the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub offset: f32,
    pub opacity: f32,
}

/// How a beam's sparks behave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkTrail {
    pub count: usize,
    /// Opacity multiplier per tick
    pub decay: f32,
    /// Distance fallen back toward the core per tick
    pub drift: f32,
}

impl From<&RayConfig> for SparkTrail {
    fn from(config: &RayConfig) -> Self {
        Self {
            count: config.sparks,
            decay: config.spark_decay,
            drift: config.spark_drift,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayStream {
    /// Direction from the core (radians)
    pub angle: f32,
    pub length: f32,
    pub max_length: f32,
    /// Growth per tick
    pub speed: f32,
    /// Ordered from the oldest emission to the newest
    pub sparks: Vec<Spark>,
    pub decay: f32,
    pub drift: f32,
    /// Phase offset for pulsing, decorrelates sibling beams
    pub phase: f32,
}

impl RayStream {
    pub fn new(angle: f32, max_length: f32, speed: f32, trail: SparkTrail) -> Self {
        // Staggered opacities so the sparks do not all fade out on the same tick
        let count = trail.count;
        let sparks = (0..count)
            .map(|i| Spark {
                offset: 0.0,
                opacity: (i as f32 + 1.0) / count as f32,
            })
            .collect();
        Self {
            angle,
            length: 0.0,
            max_length: max_length.max(0.0),
            speed: speed.max(0.0),
            sparks,
            decay: trail.decay.clamp(0.0, 0.999),
            drift: trail.drift.max(0.0),
            phase: angle,
        }
    }

    /// Beam in angular slot `index` of `count` evenly spaced slots
    pub fn in_slot<R: Rng + ?Sized>(index: usize, count: usize, config: &RayConfig, rng: &mut R) -> Self {
        let angle = index as f32 * std::f32::consts::TAU / count.max(1) as f32;
        Self::new(
            angle,
            config.max_length.sample(rng),
            config.speed.sample(rng),
            SparkTrail::from(config),
        )
    }

    /// Beam length has reached its cap
    pub fn is_fully_grown(&self) -> bool {
        self.length >= self.max_length
    }
}

impl Entity for RayStream {
    fn advance<R: Rng + ?Sized>(&mut self, _frame: &Frame, _rng: &mut R) {
        self.length = (self.length + self.speed).min(self.max_length);

        let tip = self.length;
        for spark in &mut self.sparks {
            spark.opacity *= self.decay;
            spark.offset = (spark.offset - self.drift).max(0.0);
            if spark.opacity < SPARK_RESPAWN_OPACITY && tip > 0.0 {
                spark.offset = tip;
                spark.opacity = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::frame::Bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn frame(t: u64) -> Frame {
        Frame::new(t, Bounds::new(800, 600))
    }

    fn trail(count: usize) -> SparkTrail {
        SparkTrail {
            count,
            ..SparkTrail::from(&RayConfig::default())
        }
    }

    #[test]
    fn test_length_grows_then_caps() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut ray = RayStream::new(0.0, 10.0, 4.0, trail(3));
        ray.advance(&frame(1), &mut rng);
        assert_eq!(ray.length, 4.0);
        ray.advance(&frame(2), &mut rng);
        assert_eq!(ray.length, 8.0);
        ray.advance(&frame(3), &mut rng);
        assert_eq!(ray.length, 10.0);
        assert!(ray.is_fully_grown());
    }

    #[test]
    fn test_sparks_stay_on_the_beam_and_repopulate() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut ray = RayStream::new(1.0, 200.0, 3.0, trail(6));
        let mut respawned = 0;
        for t in 1..500 {
            let before: Vec<f32> = ray.sparks.iter().map(|s| s.opacity).collect();
            ray.advance(&frame(t), &mut rng);
            for (spark, old) in ray.sparks.iter().zip(before) {
                assert!(spark.offset >= 0.0 && spark.offset <= ray.length);
                assert!(spark.opacity > 0.0 && spark.opacity <= 1.0);
                if spark.opacity > old {
                    respawned += 1;
                }
            }
        }
        assert!(respawned > 6);
    }

    #[test]
    fn test_spark_trail_is_taken_from_the_caller() {
        let mut rng = Pcg32::seed_from_u64(0);
        let trail = SparkTrail {
            count: 2,
            decay: 0.5,
            drift: 0.0,
        };
        let mut ray = RayStream::new(0.0, 50.0, 1.0, trail);
        ray.advance(&frame(1), &mut rng);
        assert_eq!(ray.sparks[1].opacity, 0.5);

        let config = RayConfig {
            spark_decay: 0.8,
            spark_drift: 3.0,
            ..RayConfig::default()
        };
        let ray = RayStream::in_slot(0, 4, &config, &mut rng);
        assert_eq!((ray.decay, ray.drift), (0.8, 3.0));
    }

    #[test]
    fn test_slots_are_evenly_spaced() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = RayConfig::default();
        let a = RayStream::in_slot(0, 8, &config, &mut rng);
        let b = RayStream::in_slot(2, 8, &config, &mut rng);
        assert_eq!(a.angle, 0.0);
        assert!((b.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(b.sparks.len(), config.sparks);
    }
}
