//! Recording surface
//!
//! Keeps the primitives of the current frame in device space instead of
//! rasterizing them. Used by the headless driver and by tests to observe what
//! the scene painted. Invalid geometry is rejected the way a canvas would
//! reject it, so painter bugs show up as errors instead of silent garbage.

use glam::{Affine2, Vec2};

use super::{Glow, Paint, Rect, Stroke, Surface, SurfaceError};

/// Geometry of a recorded primitive, already transformed to device space
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Rectangles are recorded as quads since they may be rotated
    Quad([Vec2; 4]),
    Polygon(Vec<Vec2>),
    Circle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Fill(Paint),
    Stroke(Stroke),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub style: Style,
    pub alpha: f32,
    pub glow: Option<Glow>,
}

impl DrawCommand {
    pub fn points(&self) -> Vec<Vec2> {
        match &self.shape {
            Shape::Quad(q) => q.to_vec(),
            Shape::Polygon(p) => p.clone(),
            Shape::Circle { center, .. } => vec![*center],
            Shape::Line { from, to } => vec![*from, *to],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
    glow: Option<Glow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            glow: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    commands: Vec<DrawCommand>,
    frames: u64,
    resizes: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Primitives painted since the last `begin_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames begun
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of resizes that actually changed the size
    pub fn resizes(&self) -> u32 {
        self.resizes
    }

    /// Unbalanced `save` calls in the current frame
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn record(&mut self, shape: Shape, style: Style) -> Result<(), SurfaceError> {
        check_style(&style)?;
        self.commands.push(DrawCommand {
            shape,
            style,
            alpha: self.state.alpha,
            glow: self.state.glow,
        });
        Ok(())
    }

    fn to_device(&self, points: &[Vec2]) -> Result<Vec<Vec2>, SurfaceError> {
        points
            .iter()
            .map(|p| finite_point(self.state.transform.transform_point2(*p)))
            .collect()
    }
}

fn finite_point(p: Vec2) -> Result<Vec2, SurfaceError> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(SurfaceError::Geometry("non-finite point"))
    }
}

fn check_paint(paint: &Paint) -> Result<(), SurfaceError> {
    match paint {
        Paint::Solid(color) if !color.is_finite() => Err(SurfaceError::Geometry("non-finite color")),
        Paint::Solid(_) => Ok(()),
        Paint::Linear { start, end, stops } => {
            finite_point(*start)?;
            finite_point(*end)?;
            check_stops(stops)
        }
        Paint::Radial {
            center,
            inner,
            outer,
            stops,
        } => {
            finite_point(*center)?;
            // Same rule as CanvasRenderingContext2D.createRadialGradient
            if !(inner.is_finite() && outer.is_finite()) || *inner < 0.0 || *outer < 0.0 {
                return Err(SurfaceError::Geometry("gradient radius"));
            }
            check_stops(stops)
        }
    }
}

fn check_stops(stops: &[super::GradientStop]) -> Result<(), SurfaceError> {
    for stop in stops {
        if !(0.0..=1.0).contains(&stop.offset) {
            return Err(SurfaceError::Geometry("gradient stop offset"));
        }
        if !stop.color.is_finite() {
            return Err(SurfaceError::Geometry("non-finite color"));
        }
    }
    Ok(())
}

fn check_style(style: &Style) -> Result<(), SurfaceError> {
    match style {
        Style::Fill(paint) => check_paint(paint),
        Style::Stroke(stroke) => {
            if !stroke.width.is_finite() || stroke.width < 0.0 {
                return Err(SurfaceError::Geometry("stroke width"));
            }
            check_paint(&stroke.paint)
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.resizes += 1;
    }

    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        self.state = DrawState::default();
        self.stack.clear();
        self.commands.clear();
        self.frames += 1;
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) -> Result<(), SurfaceError> {
        finite_point(offset)?;
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
        Ok(())
    }

    fn rotate(&mut self, angle: f32) -> Result<(), SurfaceError> {
        if !angle.is_finite() {
            return Err(SurfaceError::Geometry("non-finite angle"));
        }
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) {
        // Canvas ignores non-finite globalAlpha assignments
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.state.glow = glow;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError> {
        let corners = self.to_device(&rect.corners())?;
        let quad = [corners[0], corners[1], corners[2], corners[3]];
        self.record(Shape::Quad(quad), Style::Fill(paint.clone()))
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), SurfaceError> {
        let corners = self.to_device(&rect.corners())?;
        let quad = [corners[0], corners[1], corners[2], corners[3]];
        self.record(Shape::Quad(quad), Style::Stroke(stroke.clone()))
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<(), SurfaceError> {
        let points = self.to_device(points)?;
        self.record(Shape::Polygon(points), Style::Fill(paint.clone()))
    }

    fn stroke_polygon(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError> {
        let points = self.to_device(points)?;
        self.record(Shape::Polygon(points), Style::Stroke(stroke.clone()))
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<(), SurfaceError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SurfaceError::Geometry("circle radius"));
        }
        let center = finite_point(self.state.transform.transform_point2(center))?;
        self.record(Shape::Circle { center, radius }, Style::Fill(paint.clone()))
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError> {
        let from = finite_point(self.state.transform.transform_point2(from))?;
        let to = finite_point(self.state.transform.transform_point2(to))?;
        self.record(Shape::Line { from, to }, Style::Stroke(stroke.clone()))
    }
}
