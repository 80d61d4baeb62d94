//! Scene orchestration
//!
//! The scene owns the surface, the clock, the RNG and every entity
//! collection. One `step` is one frame: snapshot the surface size, advance
//! the clock, paint the background, then advance and paint each collection in
//! a fixed order (connectors, shards, core and rays, particles, overlay).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::renderer::{Beam, Render, Surface, SurfaceError, paint_background, paint_overlay};
use crate::settings::SceneConfig;
use crate::sim::{Anchor, Anchors, Bounds, Clock, Connector, Core, Entity, Frame, Particle, RayStream, Shard};

/// What a call to [`Scene::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame was simulated and painted
    Drawn,
    /// The surface has no area yet; nothing changed, retry next tick
    Skipped,
}

/// Serializable view of the simulation state
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot<'a> {
    pub time: u64,
    pub width: u32,
    pub height: u32,
    pub shards: &'a [Shard],
    pub connectors: &'a [Connector],
    pub particles: &'a [Particle],
    pub core: Option<&'a Core>,
    pub rays: &'a [RayStream],
}

pub struct Scene<S: Surface, R: Rng = Pcg32> {
    surface: S,
    config: SceneConfig,
    rng: R,
    clock: Clock,
    shards: Vec<Shard>,
    connectors: Vec<Connector>,
    particles: Vec<Particle>,
    core: Option<Core>,
    rays: Vec<RayStream>,
}

impl<S: Surface, R: Rng> Scene<S, R> {
    /// Build every entity with randomized parameters from `config`. The
    /// config is sanitized first, see [`SceneConfig::sanitized`].
    pub fn new(surface: S, config: SceneConfig, mut rng: R) -> Self {
        let config = config.sanitized();
        let bounds = Bounds::new(surface.width(), surface.height());

        let shards: Vec<Shard> = (0..config.shard_count())
            .map(|_| Shard::spawn(&config.shards, bounds, &mut rng))
            .collect();
        let particles = (0..config.particle_count())
            .map(|_| Particle::spawn(&config.particles, bounds, &mut rng))
            .collect();

        let core = config.core.enabled.then(|| Core::new(&config.core, bounds));
        let ray_count = config.ray_count();
        let rays = (0..ray_count)
            .map(|i| RayStream::in_slot(i, ray_count, &config.rays, &mut rng))
            .collect();

        let mut connectors = Connector::chain(shards.len());
        if core.is_some() {
            connectors.extend(
                (0..config.core.links.min(shards.len()))
                    .map(|i| Connector::new(Anchor::Core, Anchor::Shard(i))),
            );
        }

        log::info!(
            "Scene initialized: {}x{}, {} shards, {} connectors, {} particles, {} rays",
            bounds.width,
            bounds.height,
            shards.len(),
            connectors.len(),
            config.particle_count(),
            ray_count
        );

        Self {
            surface,
            config,
            rng,
            clock: Clock::new(),
            shards,
            connectors,
            particles,
            core,
            rays,
        }
    }

    /// Simulate and paint one frame.
    ///
    /// A failed primitive does not cut the frame short: every collection
    /// still advances and paints, and the first error is returned afterwards.
    pub fn step(&mut self) -> Result<StepOutcome, SurfaceError> {
        // Size is read once; a resize landing mid-frame applies next frame
        let bounds = Bounds::new(self.surface.width(), self.surface.height());
        if bounds.is_degenerate() {
            log::trace!("Skipping frame on {}x{} surface", bounds.width, bounds.height);
            return Ok(StepOutcome::Skipped);
        }

        let frame = Frame::new(self.clock.tick(), bounds);
        let config = &self.config;
        let surface = &mut self.surface;
        let rng = &mut self.rng;
        let mut first_error = None;
        let mut keep = |result: Result<(), SurfaceError>| {
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        };

        keep(surface.begin_frame());
        keep(paint_background(
            surface,
            &frame,
            &config.background,
            config.quality.grid_enabled(),
        ));

        for connector in &mut self.connectors {
            connector.advance(&frame, rng);
        }
        let anchors = Anchors {
            shards: &self.shards,
            core: self.core.as_ref(),
        };
        for connector in &self.connectors {
            if let Some(link) = connector.resolve(&anchors) {
                keep(link.render(surface, &frame, config));
            }
        }

        for shard in &mut self.shards {
            shard.advance(&frame, rng);
            keep(shard.render(surface, &frame, config));
        }

        if let Some(core) = self.core.as_mut() {
            core.advance(&frame, rng);
            keep(core.render(surface, &frame, config));
            for ray in &mut self.rays {
                ray.advance(&frame, rng);
                let beam = Beam {
                    ray,
                    origin: core.center,
                };
                keep(beam.render(surface, &frame, config));
            }
        }

        for particle in &mut self.particles {
            particle.advance(&frame, rng);
            keep(particle.render(surface, &frame, config));
        }

        keep(paint_overlay(surface, &frame, &config.overlay));

        match first_error {
            Some(e) => Err(e),
            None => Ok(StepOutcome::Drawn),
        }
    }

    /// Forward a viewport change to the surface. Entities are not moved; they
    /// wrap or bounce against the new bounds on their next advance.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.surface.width(), self.surface.height()) {
            log::debug!("Resize to {}x{}", width, height);
        }
        self.surface.resize(width, height);
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn shards_mut(&mut self) -> &mut [Shard] {
        &mut self.shards
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn core(&self) -> Option<&Core> {
        self.core.as_ref()
    }

    pub fn rays(&self) -> &[RayStream] {
        &self.rays
    }

    pub fn snapshot(&self) -> SceneSnapshot<'_> {
        SceneSnapshot {
            time: self.clock.ticks(),
            width: self.surface.width(),
            height: self.surface.height(),
            shards: &self.shards,
            connectors: &self.connectors,
            particles: &self.particles,
            core: self.core.as_ref(),
            rays: &self.rays,
        }
    }
}
