//! Entity painters
//!
//! Painting never mutates simulation state. Every modulated value comes from
//! a bounded pulse and is clamped before it reaches the surface.

use glam::Vec2;

use super::{Color, Glow, GradientStop, Paint, Rect, Stroke, Surface, SurfaceError, isolated};
use crate::settings::{BackgroundConfig, OverlayConfig, SceneConfig};
use crate::sim::{Core, Frame, Link, Particle, RayStream, Shard};

/// Shared per-frame draw contract of every animated entity
pub trait Render {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError>;
}

/// A beam resolved against the core it radiates from
#[derive(Debug, Clone, Copy)]
pub struct Beam<'a> {
    pub ray: &'a RayStream,
    pub origin: Vec2,
}

impl Beam<'_> {
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.ray.angle)
    }

    pub fn tip(&self) -> Vec2 {
        self.origin + self.direction() * self.ray.length
    }
}

impl Render for Shard {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError> {
        let cfg = &config.shards;
        let t = frame.time;
        let outline = self.outline();
        let s = self.size * self.depth_scale();

        isolated(surface, |surface| {
            surface.translate(self.pos)?;
            surface.rotate(self.rotation)?;
            surface.set_alpha(cfg.alpha.at(t, self.z));
            if config.quality.glow_enabled() {
                surface.set_glow(Some(Glow {
                    color: Color::hsla(self.hue, 100.0, 50.0, 0.7),
                    blur: cfg.glow_blur.at(t, 0.0).max(0.0),
                }));
            }

            let fill = Paint::Linear {
                start: Vec2::new(-s, -s),
                end: Vec2::new(s, s),
                stops: vec![
                    GradientStop::new(0.0, Color::hsla(self.hue, 100.0, 70.0, 0.6)),
                    GradientStop::new(0.5, Color::hsla(self.hue, 80.0, self.lightness, 0.3)),
                    GradientStop::new(1.0, Color::hsla(self.hue, 100.0, 60.0, 0.5)),
                ],
            };
            surface.fill_polygon(&outline, &fill)?;

            let edge = Stroke::solid(
                Color::hsla(self.hue, 100.0, 70.0, cfg.stroke_alpha.at(t, 0.0).clamp(0.0, 1.0)),
                cfg.stroke_width.at(t, 0.0).max(0.0),
            );
            surface.stroke_polygon(&outline, &edge)
        })
    }
}

impl Render for Particle {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        _frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError> {
        isolated(surface, |surface| {
            surface.set_alpha(self.opacity);
            let paint = Paint::Solid(Color::hsla(config.particles.hue, 100.0, 70.0, 1.0));
            surface.fill_circle(self.pos, self.apparent_size().max(0.0), &paint)
        })
    }
}

impl Render for Link {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError> {
        let cfg = &config.links;
        let t = frame.time;

        let line = Stroke::solid(Color::hsla(cfg.hue, 100.0, 50.0, cfg.line_alpha), cfg.line_width);
        surface.stroke_line(self.from, self.to, &line)?;

        let lightness = cfg.dot_lightness.at(t, 0.0);
        let dot = Paint::Solid(Color::hsla(cfg.hue, 100.0, lightness, cfg.dot_alpha));
        surface.fill_circle(self.pulse_point(), cfg.dot_radius.at(t, 0.0).max(0.0), &dot)
    }
}

impl Render for Core {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        _frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError> {
        let strength = self.strength.clamp(0.0, 1.0);
        let halo_radius = (self.radius + self.glow).max(0.0);

        // Soft halo
        let halo = Paint::Radial {
            center: self.center,
            inner: 0.0,
            outer: halo_radius,
            stops: vec![
                GradientStop::new(0.0, Color::hsla(self.hue, 100.0, 60.0, strength * 0.5)),
                GradientStop::new(1.0, Color::hsla(self.hue, 100.0, 60.0, 0.0)),
            ],
        };
        surface.fill_circle(self.center, halo_radius, &halo)?;

        isolated(surface, |surface| {
            if config.quality.glow_enabled() {
                surface.set_glow(Some(Glow {
                    color: Color::hsla(self.hue, 100.0, 60.0, 0.8),
                    blur: self.glow.max(0.0),
                }));
            }
            let shell = self.hexagon(1.0);
            surface.fill_polygon(&shell, &Paint::Solid(Color::hsla(self.hue, 90.0, 55.0, strength)))?;
            surface.stroke_polygon(&shell, &Stroke::solid(Color::hsla(self.hue, 100.0, 75.0, 0.9), 2.0))?;
            let inner = self.hexagon(0.55);
            surface.stroke_polygon(
                &inner,
                &Stroke::solid(Color::hsla(self.hue + 30.0, 100.0, 80.0, strength), 1.0),
            )
        })
    }
}

impl Render for Beam<'_> {
    fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &Frame,
        config: &SceneConfig,
    ) -> Result<(), SurfaceError> {
        let cfg = &config.rays;
        let ray = self.ray;
        if ray.length <= 0.0 {
            return Ok(());
        }
        let alpha = cfg.alpha.at(frame.time, ray.phase).clamp(0.0, 1.0);
        let tip = self.tip();

        let beam = Stroke {
            paint: Paint::Linear {
                start: self.origin,
                end: tip,
                stops: vec![
                    GradientStop::new(0.0, Color::hsla(cfg.hue, 100.0, 65.0, alpha)),
                    GradientStop::new(1.0, Color::hsla(cfg.hue, 100.0, 65.0, 0.0)),
                ],
            },
            width: 1.5,
        };
        surface.stroke_line(self.origin, tip, &beam)?;

        let dir = self.direction();
        for spark in &ray.sparks {
            let color = Color::hsla(cfg.hue, 100.0, 80.0, (spark.opacity * alpha * 2.0).clamp(0.0, 1.0));
            surface.fill_circle(
                self.origin + dir * spark.offset,
                1.0 + spark.opacity,
                &Paint::Solid(color),
            )?;
        }
        Ok(())
    }
}

/// Dark radial void plus the faint drifting grid
pub fn paint_background<S: Surface + ?Sized>(
    surface: &mut S,
    frame: &Frame,
    config: &BackgroundConfig,
    grid: bool,
) -> Result<(), SurfaceError> {
    let bounds = frame.bounds;
    let center = bounds.center();
    let void = Paint::Radial {
        center,
        inner: 0.0,
        outer: bounds.width.max(bounds.height),
        stops: config.stops.clone(),
    };
    surface.fill_rect(Rect::new(0.0, 0.0, bounds.width, bounds.height), &void)?;

    if !grid {
        return Ok(());
    }
    let spacing = config.grid_spacing.max(1.0);
    let cell = (spacing - config.grid_drift.amplitude.abs()).max(1.0);
    let line = Stroke::solid(Color::hsla(config.grid_hue, 100.0, 50.0, 0.3), 0.5);

    isolated(surface, |surface| {
        surface.set_alpha(config.grid_alpha.at(frame.time, 0.0));
        let mut x = 0.0;
        while x < bounds.width {
            let mut y = 0.0;
            while y < bounds.height {
                let dx = config.grid_drift.at(frame.time, x);
                let dy = config.grid_drift.at(frame.time, y + std::f32::consts::FRAC_PI_2);
                surface.stroke_rect(Rect::new(x + dx, y + dy, cell, cell), &line)?;
                y += spacing;
            }
            x += spacing;
        }
        Ok(())
    })
}

/// Slanted light shafts swaying over the whole scene
pub fn paint_overlay<S: Surface + ?Sized>(
    surface: &mut S,
    frame: &Frame,
    config: &OverlayConfig,
) -> Result<(), SurfaceError> {
    let bounds = frame.bounds;
    isolated(surface, |surface| {
        surface.set_alpha(config.alpha);
        for i in 0..config.rays {
            let x = bounds.width * (0.3 + i as f32 * 0.2);
            let shaft = Paint::Linear {
                start: Vec2::new(x, 0.0),
                end: Vec2::new(x + 100.0, bounds.height),
                stops: vec![
                    GradientStop::new(0.0, Color::hsla(config.hue, 100.0, 50.0, 0.0)),
                    GradientStop::new(0.5, Color::hsla(config.hue, 100.0, 50.0, 1.0)),
                    GradientStop::new(1.0, Color::hsla(config.hue, 100.0, 50.0, 0.0)),
                ],
            };
            let sway = config.sway.at(frame.time, i as f32);
            surface.fill_rect(Rect::new(x + sway, 0.0, config.width.max(0.0), bounds.height), &shaft)?;
        }
        Ok(())
    })
}
