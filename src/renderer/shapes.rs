//! Display list generation
//!
//! A frame is drawn back to front from a flat list of primitives. Backends
//! only need to fill rectangles, circles, polygons and text.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::{BirdView, GamePhase, PipeView, Snapshot};

/// RGBA, each channel in 0..=1
pub type Color = [f32; 4];

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

pub const SKY_BLUE: Color = rgb(135, 206, 235);
pub const WHITE: Color = rgb(255, 255, 255);
pub const BLACK: Color = rgb(0, 0, 0);
pub const RED: Color = rgb(255, 0, 0);
pub const ORANGE: Color = rgb(255, 165, 0);
pub const PIPE_GREEN: Color = rgb(34, 177, 76);
pub const PIPE_SHADE: Color = rgb(25, 160, 60);

pub const FONT_SIZE: f32 = 36.0;
const LIP_HEIGHT: f32 = 30.0;
const LIP_OVERHANG: f32 = 10.0;
const SHADE_WIDTH: f32 = 10.0;
const EYE_RADIUS: f32 = 5.0;
const PUPIL_RADIUS: f32 = 3.0;
/// Angle between the beak tip and its back corners (radians)
const BEAK_SPREAD: f32 = 2.6;
/// Eye sits this far (radians) above the heading
const EYE_OFFSET: f32 = 0.5;

const CLOUD_COUNT: usize = 3;
/// Stream id that keeps cloud placement apart from the gap RNG
const CLOUD_STREAM: u64 = 0xc10d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the top-left corner
    Left,
    /// `pos` is the top-center
    Center,
}

/// One drawing primitive in screen pixels (y down)
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Fill the whole surface
    Clear { color: Color },
    Rect { min: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Background cloud (three overlapping puffs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub center: Vec2,
}

/// Place the background clouds for a session
pub fn clouds(seed: u64, width: f32, height: f32) -> Vec<Cloud> {
    let mut rng = Pcg32::new(seed, CLOUD_STREAM);
    let top = 50.0_f32.min(height);
    let bottom = (height - 100.0).max(top);
    (0..CLOUD_COUNT)
        .map(|_| Cloud {
            center: Vec2::new(
                rng.random_range(0.0..=width.max(0.0)),
                rng.random_range(top..=bottom),
            ),
        })
        .collect()
}

/// Build the full frame for `snapshot`
pub fn scene(snapshot: &Snapshot, clouds: &[Cloud]) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(8 + clouds.len() * 3 + snapshot.pipes.len() * 6);

    shapes.push(Shape::Clear { color: SKY_BLUE });
    for cloud in clouds {
        cloud_shapes(cloud, &mut shapes);
    }
    for pipe in &snapshot.pipes {
        pipe_shapes(pipe, snapshot.visible_height, &mut shapes);
    }
    bird_shapes(&snapshot.bird, &mut shapes);
    hud_shapes(snapshot, &mut shapes);

    shapes
}

fn cloud_shapes(cloud: &Cloud, out: &mut Vec<Shape>) {
    let c = cloud.center;
    for (dx, radius) in [(0.0, 20.0), (-15.0, 15.0), (15.0, 15.0)] {
        out.push(Shape::Circle {
            center: c + Vec2::new(dx, 0.0),
            radius,
            color: WHITE,
        });
    }
}

fn pipe_shapes(pipe: &PipeView, height: f32, out: &mut Vec<Shape>) {
    let gap_top = pipe.gap_center_y - pipe.gap_height / 2.0;
    let gap_bottom = pipe.gap_center_y + pipe.gap_height / 2.0;
    pipe_section(pipe, 0.0, gap_top, true, out);
    pipe_section(pipe, gap_bottom, height, false, out);
}

/// Body, lip at the gap end, then the shaded right edge
fn pipe_section(pipe: &PipeView, start_y: f32, end_y: f32, is_top: bool, out: &mut Vec<Shape>) {
    let length = end_y - start_y;
    out.push(Shape::Rect {
        min: Vec2::new(pipe.x, start_y),
        size: Vec2::new(pipe.width, length),
        color: PIPE_GREEN,
    });

    let lip_y = if is_top { end_y - LIP_HEIGHT } else { start_y };
    out.push(Shape::Rect {
        min: Vec2::new(pipe.x - LIP_OVERHANG, lip_y),
        size: Vec2::new(pipe.width + LIP_OVERHANG * 2.0, LIP_HEIGHT),
        color: PIPE_SHADE,
    });

    out.push(Shape::Rect {
        min: Vec2::new(pipe.x + pipe.width - SHADE_WIDTH, start_y),
        size: Vec2::new(SHADE_WIDTH, length),
        color: PIPE_SHADE,
    });
}

/// Unit vector for a screen angle in radians (counter-clockwise, y down)
fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

fn bird_shapes(bird: &BirdView, out: &mut Vec<Shape>) {
    let center = Vec2::new(bird.x, bird.y);
    let angle = bird.tilt.to_radians();
    let offset = (bird.size / 3.0).floor();
    let beak_length = (bird.size / 2.0).floor();
    let beak_back = (beak_length / 2.0).floor();

    out.push(Shape::Circle {
        center,
        radius: beak_length,
        color: RED,
    });

    let beak_center = center + heading(angle) * offset;
    out.push(Shape::Polygon {
        points: vec![
            beak_center + heading(angle) * beak_length,
            beak_center + heading(angle + BEAK_SPREAD) * beak_back,
            beak_center + heading(angle - BEAK_SPREAD) * beak_back,
        ],
        color: ORANGE,
    });

    let eye = center + heading(angle + EYE_OFFSET) * offset;
    out.push(Shape::Circle {
        center: eye,
        radius: EYE_RADIUS,
        color: WHITE,
    });
    out.push(Shape::Circle {
        center: eye,
        radius: PUPIL_RADIUS,
        color: BLACK,
    });
}

fn hud_shapes(snapshot: &Snapshot, out: &mut Vec<Shape>) {
    out.push(Shape::Text {
        pos: Vec2::new(10.0, 10.0),
        text: format!("Score: {}", snapshot.score),
        size: FONT_SIZE,
        align: TextAlign::Left,
        color: BLACK,
    });
    if snapshot.best_score > 0 {
        out.push(Shape::Text {
            pos: Vec2::new(10.0, 10.0 + FONT_SIZE),
            text: format!("Best: {}", snapshot.best_score),
            size: FONT_SIZE * 0.6,
            align: TextAlign::Left,
            color: BLACK,
        });
    }

    if snapshot.phase == GamePhase::GameOver {
        out.push(Shape::Text {
            pos: Vec2::new(
                (snapshot.visible_width / 2.0).floor(),
                (snapshot.visible_height / 2.0).floor(),
            ),
            text: "Game Over! Press SPACE to restart".to_string(),
            size: FONT_SIZE,
            align: TextAlign::Center,
            color: BLACK,
        });
    }
}
