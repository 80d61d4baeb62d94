//! `CanvasRenderingContext2d` surface (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Glow, Paint, Rect, Stroke, Surface, SurfaceError};

fn js_error(err: JsValue) -> SurfaceError {
    SurfaceError::Canvas(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Outstanding `save` calls on the context
    saved: usize,
}

impl CanvasSurface {
    /// Wrap a canvas. Returns `None` when no 2d context is available.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            saved: 0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn gradient(&self, paint: &Paint) -> Result<Option<CanvasGradient>, SurfaceError> {
        let gradient = match paint {
            Paint::Solid(_) => return Ok(None),
            Paint::Linear { start, end, .. } => self.ctx.create_linear_gradient(
                start.x as f64,
                start.y as f64,
                end.x as f64,
                end.y as f64,
            ),
            Paint::Radial {
                center,
                inner,
                outer,
                ..
            } => self
                .ctx
                .create_radial_gradient(
                    center.x as f64,
                    center.y as f64,
                    *inner as f64,
                    center.x as f64,
                    center.y as f64,
                    *outer as f64,
                )
                .map_err(js_error)?,
        };
        for stop in paint.stops() {
            gradient
                .add_color_stop(stop.offset, &stop.color.css())
                .map_err(js_error)?;
        }
        Ok(Some(gradient))
    }

    fn apply_fill(&self, paint: &Paint) -> Result<(), SurfaceError> {
        match (paint, self.gradient(paint)?) {
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_fill_style_str(&color.css()),
            _ => {}
        }
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<(), SurfaceError> {
        match (&stroke.paint, self.gradient(&stroke.paint)?) {
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_stroke_style_str(&color.css()),
            _ => {}
        }
        self.ctx.set_line_width(stroke.width as f64);
        Ok(())
    }

    fn trace_polygon(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Assigning the size clears the canvas even when unchanged
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        // Unwind whatever an aborted frame left on the context stack
        while self.saved > 0 {
            self.ctx.restore();
            self.saved -= 1;
        }
        self.ctx
            .set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(js_error)?;
        self.ctx.set_global_alpha(1.0);
        self.set_glow(None);
        self.ctx
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
        Ok(())
    }

    fn save(&mut self) {
        self.ctx.save();
        self.saved += 1;
    }

    fn restore(&mut self) {
        if self.saved > 0 {
            self.ctx.restore();
            self.saved -= 1;
        }
    }

    fn translate(&mut self, offset: Vec2) -> Result<(), SurfaceError> {
        self.ctx
            .translate(offset.x as f64, offset.y as f64)
            .map_err(js_error)
    }

    fn rotate(&mut self, angle: f32) -> Result<(), SurfaceError> {
        self.ctx.rotate(angle as f64).map_err(js_error)
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.css());
                self.ctx.set_shadow_blur(glow.blur.max(0.0) as f64);
            }
            None => {
                self.ctx.set_shadow_color("transparent");
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError> {
        self.apply_fill(paint)?;
        self.ctx.fill_rect(
            rect.origin.x as f64,
            rect.origin.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.apply_stroke(stroke)?;
        self.ctx.stroke_rect(
            rect.origin.x as f64,
            rect.origin.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<(), SurfaceError> {
        self.apply_fill(paint)?;
        self.trace_polygon(points);
        self.ctx.fill();
        Ok(())
    }

    fn stroke_polygon(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError> {
        self.apply_stroke(stroke)?;
        self.trace_polygon(points);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<(), SurfaceError> {
        self.apply_fill(paint)?;
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(js_error)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }
}
