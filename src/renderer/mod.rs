//! Immediate-mode 2D rendering
//!
//! `Surface` is the drawing target the scene paints into every frame. Every
//! primitive takes its styling explicitly and is applied at once; nothing is
//! retained between frames.

pub mod color;
pub mod paint;
pub mod recorder;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::{Color, GradientStop};
pub use paint::{Beam, Render, paint_background, paint_overlay};
pub use recorder::{DrawCommand, RecordingSurface, Shape, Style};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors a surface can report for a single primitive
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The canvas rejected a call (JS exception text)
    Canvas(String),
    /// A primitive received NaN/infinite or negative-extent geometry
    Geometry(&'static str),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Canvas(msg) => write!(f, "canvas error: {msg}"),
            SurfaceError::Geometry(what) => write!(f, "invalid geometry: {what}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn corners(&self) -> [Vec2; 4] {
        let Rect { origin, size } = *self;
        [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ]
    }
}

/// How a shape is colored
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        inner: f32,
        outer: f32,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Paint::Solid(_) => &[],
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => stops,
        }
    }
}

/// Outline style
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
        }
    }
}

/// Blurred halo drawn behind subsequent shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// A resizable 2D drawing target
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Set the pixel size. Calling it again with the same size changes nothing.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset transform, alpha and glow, and clear the whole surface
    fn begin_frame(&mut self) -> Result<(), SurfaceError>;

    /// Push transform/alpha/glow state
    fn save(&mut self);
    /// Pop transform/alpha/glow state
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2) -> Result<(), SurfaceError>;
    fn rotate(&mut self, angle: f32) -> Result<(), SurfaceError>;
    /// Global alpha multiplier for subsequent primitives, clamped to 0..1
    fn set_alpha(&mut self, alpha: f32);
    fn set_glow(&mut self, glow: Option<Glow>);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError>;
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), SurfaceError>;
    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<(), SurfaceError>;
    fn stroke_polygon(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<(), SurfaceError>;
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError>;
}

/// Run `paint` between `save` and `restore`. The state is restored even when
/// `paint` fails partway through.
pub fn isolated<S, F>(surface: &mut S, paint: F) -> Result<(), SurfaceError>
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S) -> Result<(), SurfaceError>,
{
    surface.save();
    let result = paint(surface);
    surface.restore();
    result
}
