//! Collision detection
//!
//! Axis-aligned boxes only: the bird is a square hit-box, each pipe is an
//! upper and a lower rectangle around its gap. Leaving the screen vertically
//! always counts as a crash.

use glam::Vec2;

use super::bird::Bird;
use super::pipe::Pipe;
use crate::config::GameConfig;

/// Axis-aligned rectangle (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Zero (or negative) area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Strict overlap test: shared edges do not count and empty rectangles
    /// never overlap anything
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The bird's hit-box
#[inline]
pub fn bird_hitbox(bird: &Bird) -> Rect {
    Rect::centered(bird.pos, bird.size)
}

/// Upper and lower rectangles of a pipe pair
pub fn pipe_rects(pipe: &Pipe, config: &GameConfig) -> [Rect; 2] {
    let upper = Rect::new(
        Vec2::new(pipe.x, 0.0),
        Vec2::new(pipe.right(), pipe.gap_top(config.gap_height)),
    );
    let lower = Rect::new(
        Vec2::new(pipe.x, pipe.gap_bottom(config.gap_height)),
        Vec2::new(pipe.right(), config.visible_height),
    );
    [upper, lower]
}

/// Bird center above the top or below the bottom of the screen
#[inline]
pub fn out_of_bounds(bird: &Bird, config: &GameConfig) -> bool {
    bird.pos.y < 0.0 || bird.pos.y > config.visible_height
}

/// Does the bird hit this pipe (or the screen edge)?
pub fn collides(bird: &Bird, pipe: &Pipe, config: &GameConfig) -> bool {
    if out_of_bounds(bird, config) {
        return true;
    }
    let hitbox = bird_hitbox(bird);
    pipe_rects(pipe, config)
        .iter()
        .any(|rect| hitbox.overlaps(rect))
}

/// Crash verdict for a whole frame
///
/// Reports a screen-edge crash even when no pipe is alive.
pub fn collides_any<'a>(
    bird: &Bird,
    pipes: impl IntoIterator<Item = &'a Pipe>,
    config: &GameConfig,
) -> bool {
    out_of_bounds(bird, config) || pipes.into_iter().any(|pipe| collides(bird, pipe, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pipe::PipeStream;
    use proptest::prelude::*;

    fn bird_at(x: f32, y: f32) -> Bird {
        let mut bird = Bird::new(&GameConfig::default());
        bird.pos = Vec2::new(x, y);
        bird
    }

    fn pipe_at(x: f32, gap_center_y: f32) -> Pipe {
        Pipe {
            id: 0,
            x,
            gap_center_y,
            width: 80.0,
            scored: false,
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::from_xywh(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::from_xywh(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&Rect::from_xywh(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::from_xywh(0.0, -20.0, 10.0, 10.0)));
        // Touching edges
        assert!(!a.overlaps(&Rect::from_xywh(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::from_xywh(0.0, 10.0, 10.0, 10.0)));
        // Degenerate
        assert!(!a.overlaps(&Rect::from_xywh(5.0, 5.0, 0.0, 10.0)));
    }

    #[test]
    fn test_hitbox_is_centered_square() {
        let hitbox = bird_hitbox(&bird_at(133.0, 300.0));
        assert_eq!(hitbox.min, Vec2::new(118.0, 285.0));
        assert_eq!(hitbox.max, Vec2::new(148.0, 315.0));
    }

    #[test]
    fn test_pipe_rects_span_screen() {
        let config = GameConfig::default();
        let [upper, lower] = pipe_rects(&pipe_at(100.0, 300.0), &config);
        assert_eq!(upper, Rect::from_xywh(100.0, 0.0, 80.0, 225.0));
        assert_eq!(lower, Rect::from_xywh(100.0, 375.0, 80.0, 225.0));
    }

    #[test]
    fn test_above_screen_without_pipes() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, -1.0);
        assert!(out_of_bounds(&bird, &config));
        assert!(collides_any(&bird, std::iter::empty(), &config));
    }

    #[test]
    fn test_below_screen_without_pipes() {
        let config = GameConfig::default();
        assert!(collides_any(&bird_at(133.0, 601.0), &[], &config));
        assert!(!collides_any(&bird_at(133.0, 600.0), &[], &config));
    }

    #[test]
    fn test_bird_inside_gap() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, 300.0);
        assert!(!collides(&bird, &pipe_at(100.0, 300.0), &config));
    }

    #[test]
    fn test_bird_below_gap_hits_lower_pipe() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, 300.0);
        // Gap [75, 225]; the lower pipe spans [225, 600]
        assert!(collides(&bird, &pipe_at(100.0, 150.0), &config));
    }

    #[test]
    fn test_bird_above_gap_hits_upper_pipe() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, 300.0);
        assert!(collides(&bird, &pipe_at(100.0, 450.0), &config));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, 300.0);
        // Pipe starts exactly at the hit-box's right edge
        assert!(!collides(&bird, &pipe_at(148.0, 150.0), &config));
        // Pipe ends exactly at the hit-box's left edge
        assert!(!collides(&bird, &pipe_at(38.0, 150.0), &config));
        assert!(collides(&bird, &pipe_at(147.0, 150.0), &config));
    }

    #[test]
    fn test_out_of_bounds_with_harmless_pipe() {
        let config = GameConfig::default();
        let bird = bird_at(133.0, -5.0);
        assert!(collides(&bird, &pipe_at(300.0, 300.0), &config));
    }

    proptest! {
        #[test]
        fn prop_order_does_not_change_verdict(
            y in -20.0f32..620.0,
            pipes in proptest::collection::vec((-100.0f32..400.0, 150.0f32..450.0), 0..8),
        ) {
            let config = GameConfig::default();
            let bird = bird_at(133.0, y);
            let mut pipes = pipes;
            pipes.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut stream = PipeStream::new();
            for (x, gap) in pipes {
                stream.push(x, gap, 80.0);
            }
            let forward = collides_any(&bird, stream.iter(), &config);
            let reverse = collides_any(&bird, stream.iter().rev(), &config);
            prop_assert_eq!(forward, reverse);
        }

        #[test]
        fn prop_gap_center_is_safe(gap in 150.0f32..450.0) {
            let config = GameConfig::default();
            // A 30px bird centered in a 150px gap never touches the pipe
            let bird = bird_at(133.0, gap);
            prop_assert!(!collides(&bird, &pipe_at(100.0, gap), &config));
        }
    }
}
