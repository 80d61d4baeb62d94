//! Property tests for the bounded animation math

use glam::Vec2;
use proptest::prelude::*;
use prism_backdrop::consts::DEPTH_MAX;
use prism_backdrop::renderer::{RecordingSurface, Surface};
use prism_backdrop::settings::{ParticleConfig, Pulse, ShardConfig, Span};
use prism_backdrop::sim::{Bounds, Entity, Frame, Particle, Shard};
use prism_backdrop::{normalize_depth, pulse};
use rand::SeedableRng;
use rand_pcg::Pcg32;

proptest! {
    #[test]
    fn normalize_depth_is_total_and_idempotent(z in any::<f32>()) {
        let once = normalize_depth(z);
        prop_assert!((0.0..=DEPTH_MAX).contains(&once), "z={z} -> {once}");
        prop_assert_eq!(normalize_depth(once), once);
    }

    #[test]
    fn pulse_is_bounded(
        base in -100.0f32..100.0,
        amplitude in -50.0f32..50.0,
        time in any::<u64>(),
        frequency in 0.0f32..1.0,
        phase in -1000.0f32..1000.0,
    ) {
        let value = pulse(base, amplitude, time, frequency, phase);
        let bounds = Pulse::new(base, amplitude, frequency).bounds();
        prop_assert!(value >= bounds.min - 1e-3 && value <= bounds.max + 1e-3);
    }

    #[test]
    fn particles_stay_in_bounds_and_band(
        seed in any::<u64>(),
        width in 1u32..2000,
        height in 1u32..2000,
        steps in 1usize..300,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let config = ParticleConfig {
            velocity: Span::symmetric(25.0),
            lifetime: Some((5, 50)),
            depth: true,
            ..ParticleConfig::default()
        };
        let bounds = Bounds::new(width, height);
        let mut particle = Particle::spawn(&config, bounds, &mut rng);
        for t in 0..steps as u64 {
            particle.advance(&Frame::new(t, bounds), &mut rng);
            prop_assert!(bounds.contains(particle.pos), "{:?} outside {:?}", particle.pos, bounds);
            prop_assert!(config.opacity_band.contains(particle.opacity));
        }
    }

    #[test]
    fn shard_depth_stays_normalized(
        seed in any::<u64>(),
        z in -1.0e6f32..1.0e6,
        vz in -1.0e4f32..1.0e4,
        steps in 1usize..100,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Bounds::new(800, 600);
        let mut shard = Shard::spawn(&ShardConfig::default(), bounds, &mut rng);
        shard.z = z;
        shard.vz = vz;
        for t in 0..steps as u64 {
            shard.advance(&Frame::new(t, bounds), &mut rng);
            prop_assert!((0.0..=DEPTH_MAX).contains(&shard.z));
        }
    }

    #[test]
    fn resize_twice_equals_resize_once(w in 0u32..5000, h in 0u32..5000) {
        let mut once = RecordingSurface::new(640, 480);
        once.resize(w, h);
        let mut twice = RecordingSurface::new(640, 480);
        twice.resize(w, h);
        twice.resize(w, h);
        prop_assert_eq!((once.width(), once.height()), (twice.width(), twice.height()));
        prop_assert_eq!(once.resizes(), twice.resizes());
    }
}

#[test]
fn shard_wrap_recovers_from_far_outside() {
    let mut rng = Pcg32::seed_from_u64(1);
    let bounds = Bounds::new(800, 600);
    let mut shard = Shard::spawn(&ShardConfig::default(), bounds, &mut rng);
    shard.pos = Vec2::new(-5000.0, 9000.0);
    shard.advance(&Frame::new(1, bounds), &mut rng);
    assert_eq!(shard.pos, Vec2::new(800.0 + shard.size, -shard.size));
}
