//! Browser backend: draws the display list on a 2D canvas

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::shapes::{Cloud, Color, Shape, TextAlign, scene};
use crate::platform::Renderer;
use crate::sim::{GameEvent, Snapshot};

fn css(color: &Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    clouds: Vec<Cloud>,
    /// Canvas pixels per game pixel
    scale: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, clouds: Vec<Cloud>, scale: f64) -> Self {
        Self { ctx, clouds, scale }
    }

    fn draw(&self, shape: &Shape) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match shape {
            Shape::Clear { color } => {
                ctx.set_fill_style_str(&css(color));
                let canvas = ctx.canvas().ok_or("context has no canvas")?;
                ctx.fill_rect(
                    0.0,
                    0.0,
                    canvas.width() as f64 / self.scale,
                    canvas.height() as f64 / self.scale,
                );
            }
            Shape::Rect { min, size, color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            Shape::Polygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.set_fill_style_str(&css(color));
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Text {
                pos,
                text,
                size,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.set_font(&format!("{}px sans-serif", size));
                ctx.set_text_baseline("top");
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, snapshot: &Snapshot, _events: &[GameEvent]) {
        if let Err(e) = self
            .ctx
            .set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)
        {
            log::error!("Canvas transform failed: {:?}", e);
            return;
        }
        for shape in scene(snapshot, &self.clouds) {
            if let Err(e) = self.draw(&shape) {
                log::error!("Canvas draw failed: {:?}", e);
                return;
            }
        }
    }
}
