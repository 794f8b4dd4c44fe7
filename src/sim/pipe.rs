//! Pipes and the stream that spawns, scrolls and evicts them
//!
//! Every pipe scrolls at the same speed, so spawn order is also left-to-right
//! screen order: the front of the queue is always the leftmost pipe and
//! eviction only ever happens at the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// A pipe pair with a gap
///
/// Only the stream moves pipes; everything else reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub(crate) id: u32,
    /// Left edge
    pub(crate) x: f32,
    /// Vertical center of the gap (fixed at spawn)
    pub(crate) gap_center_y: f32,
    pub(crate) width: f32,
    /// Set once the bird has passed this pipe
    pub(crate) scored: bool,
}

impl Pipe {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Left edge
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn gap_center_y(&self) -> f32 {
        self.gap_center_y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn scored(&self) -> bool {
        self.scored
    }

    /// Right (trailing) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom of the upper pipe
    #[inline]
    pub fn gap_top(&self, gap_height: f32) -> f32 {
        self.gap_center_y - gap_height / 2.0
    }

    /// Top of the lower pipe
    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_center_y + gap_height / 2.0
    }

    /// Scroll left by `dx`
    #[inline]
    pub(crate) fn shift(&mut self, dx: f32) {
        self.x -= dx;
    }

    /// Fully scrolled past the left edge of the screen
    #[inline]
    pub fn offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Ordered set of live pipes
#[derive(Debug, Clone, Default)]
pub struct PipeStream {
    pipes: VecDeque<Pipe>,
    next_id: u32,
}

impl PipeStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a pipe if more than `spawn_interval_ms` has elapsed since
    /// `last_spawn_ms`
    ///
    /// Returns the spawn timestamp to carry forward: `now_ms` if a pipe was
    /// spawned, otherwise `last_spawn_ms` unchanged.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now_ms: f64,
        last_spawn_ms: f64,
        config: &GameConfig,
        rng: &mut R,
    ) -> f64 {
        if now_ms - last_spawn_ms > config.spawn_interval_ms {
            self.spawn(config, rng);
            now_ms
        } else {
            last_spawn_ms
        }
    }

    /// Spawn a pipe at the right edge with a random gap
    pub fn spawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> &Pipe {
        let (lo, hi) = config.gap_center_range();
        let gap_center_y = rng.random_range(lo..=hi) as f32;
        let id = self.push(config.visible_width, gap_center_y, config.obstacle_width);
        log::debug!("Spawned pipe {} (gap center {})", id, gap_center_y);
        &self.pipes[self.pipes.len() - 1]
    }

    /// Append a pipe at an explicit position, returning its id
    ///
    /// Pipes must arrive left to right; pruning only looks at the front.
    pub(crate) fn push(&mut self, x: f32, gap_center_y: f32, width: f32) -> u32 {
        debug_assert!(
            self.pipes.back().is_none_or(|last| last.x <= x),
            "pipe at x = {} pushed behind x = {:?}",
            x,
            self.pipes.back().map(|p| p.x)
        );
        let id = self.next_id;
        self.next_id += 1;
        self.pipes.push_back(Pipe {
            id,
            x,
            gap_center_y,
            width,
            scored: false,
        });
        id
    }

    /// Scroll every pipe left by `obstacle_speed * dt`
    pub fn advance(&mut self, dt: f32, config: &GameConfig) {
        let dx = config.obstacle_speed * dt;
        for pipe in &mut self.pipes {
            pipe.shift(dx);
        }
    }

    /// Mark pipes whose trailing edge is now behind `bird_x`
    ///
    /// Returns how many pipes were passed this call. Each pipe counts once.
    pub fn score_passed(&mut self, bird_x: f32) -> u32 {
        let mut passed = 0;
        for pipe in self.pipes.iter_mut().filter(|p| !p.scored) {
            if pipe.right() < bird_x {
                pipe.scored = true;
                passed += 1;
            }
        }
        passed
    }

    /// Evict pipes that have left the screen, returning how many went
    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        while self.pipes.front().is_some_and(Pipe::offscreen) {
            self.pipes.pop_front();
            removed += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Pipe> + ExactSizeIterator {
        self.pipes.iter()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Most recently spawned pipe
    pub fn newest(&self) -> Option<&Pipe> {
        self.pipes.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        let pipe = *stream.spawn(&config, &mut rng());
        assert_eq!(pipe.x, 400.0);
        assert_eq!(pipe.width, 80.0);
        assert!(!pipe.scored);
        assert!((150.0..=450.0).contains(&pipe.gap_center_y));
        assert_eq!(pipe.gap_center_y.fract(), 0.0);
    }

    #[test]
    fn test_maybe_spawn_respects_interval() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        let mut rng = rng();

        // Exactly the interval is not enough
        let last = stream.maybe_spawn(1500.0, 0.0, &config, &mut rng);
        assert_eq!(last, 0.0);
        assert!(stream.is_empty());

        let last = stream.maybe_spawn(1501.0, last, &config, &mut rng);
        assert_eq!(last, 1501.0);
        assert_eq!(stream.len(), 1);

        let last = stream.maybe_spawn(2000.0, last, &config, &mut rng);
        assert_eq!(last, 1501.0);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_ids_increase() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        let mut rng = rng();
        let a = stream.spawn(&config, &mut rng).id;
        let b = stream.spawn(&config, &mut rng).id;
        assert!(b > a);
        assert_eq!(stream.newest().map(|p| p.id), Some(b));
    }

    #[test]
    fn test_advance_shifts_left() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        stream.push(200.0, 300.0, 80.0);
        stream.push(350.0, 300.0, 80.0);
        stream.advance(2.0, &config);
        let xs: Vec<f32> = stream.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![194.0, 344.0]);
    }

    #[test]
    fn test_pruned_on_exact_frame() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        stream.spawn(&config, &mut rng());

        // (400 + 80) / 3 = 160 frames until the trailing edge reaches x = 0
        let frames = ((config.visible_width + config.obstacle_width) / config.obstacle_speed) as u32;
        assert_eq!(frames, 160);
        for frame in 1..=frames {
            stream.advance(1.0, &config);
            let removed = stream.prune();
            if frame < frames {
                assert_eq!(removed, 0, "pruned early on frame {frame}");
                assert_eq!(stream.len(), 1);
            } else {
                assert_eq!(removed, 1);
                assert!(stream.is_empty());
            }
        }
    }

    #[test]
    fn test_prune_keeps_order() {
        let mut stream = PipeStream::new();
        stream.push(-100.0, 300.0, 80.0);
        stream.push(-80.0, 300.0, 80.0);
        stream.push(-10.0, 300.0, 80.0);
        stream.push(150.0, 300.0, 80.0);
        assert_eq!(stream.prune(), 2);
        let xs: Vec<f32> = stream.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-10.0, 150.0]);
    }

    #[test]
    #[should_panic(expected = "pushed behind")]
    fn test_push_behind_newest_rejected() {
        let mut stream = PipeStream::new();
        stream.push(200.0, 300.0, 80.0);
        stream.push(100.0, 300.0, 80.0);
    }

    #[test]
    fn test_spawned_pipes_stay_in_screen_order() {
        let config = GameConfig::default();
        let mut stream = PipeStream::new();
        let mut rng = rng();
        let first = *stream.spawn(&config, &mut rng);
        for _ in 0..100 {
            stream.advance(1.0, &config);
        }
        stream.spawn(&config, &mut rng);
        stream.advance(1.0, &config);

        let xs: Vec<f32> = stream.iter().map(Pipe::x).collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        // The gap never moves while the pipe scrolls
        let front = stream.iter().next().unwrap();
        assert_eq!(front.id(), first.id());
        assert_eq!(front.gap_center_y(), first.gap_center_y());
        assert_eq!(front.x(), first.x() - 101.0 * config.obstacle_speed);
    }

    #[test]
    fn test_score_passed_counts_once() {
        let mut stream = PipeStream::new();
        stream.push(50.0, 300.0, 80.0); // right edge 130, behind bird at 133
        stream.push(60.0, 300.0, 80.0); // right edge 140, ahead
        assert_eq!(stream.score_passed(133.0), 1);
        assert_eq!(stream.score_passed(133.0), 0);
        assert!(stream.iter().next().is_some_and(|p| p.scored));
    }

    #[test]
    fn test_score_when_trailing_edge_crosses_bird() {
        let config = GameConfig::default();
        let bird_x = config.bird_start().x;
        let mut stream = PipeStream::new();
        stream.spawn(&config, &mut rng());

        let mut scored_on = None;
        for frame in 1..=200u32 {
            stream.advance(1.0, &config);
            if stream.score_passed(bird_x) > 0 {
                assert!(scored_on.is_none());
                scored_on = Some(frame);
            }
        }
        // 400 - 3n + 80 < 133  =>  n > 115.67
        assert_eq!(scored_on, Some(116));
    }

    proptest! {
        #[test]
        fn prop_gap_fits_screen(seed in any::<u64>(), gap in 40.0f32..300.0, margin in 0.0f32..100.0) {
            let config = GameConfig { gap_height: gap, min_gap_margin: margin, ..Default::default() };
            prop_assume!(config.validate().is_ok());
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut stream = PipeStream::new();
            for _ in 0..20 {
                let pipe = *stream.spawn(&config, &mut rng);
                let upper = pipe.gap_top(config.gap_height);
                let lower = config.visible_height - pipe.gap_bottom(config.gap_height);
                prop_assert!(upper >= margin - 1e-3, "upper pipe {} shorter than margin {}", upper, margin);
                prop_assert!(lower >= margin - 1e-3, "lower pipe {} shorter than margin {}", lower, margin);
            }
        }

        #[test]
        fn prop_prune_is_idempotent(xs in proptest::collection::vec(-200.0f32..400.0, 0..12)) {
            let mut sorted = xs;
            sorted.sort_by(f32::total_cmp);
            let mut stream = PipeStream::new();
            for x in sorted {
                stream.push(x, 300.0, 80.0);
            }
            stream.prune();
            let once: Vec<Pipe> = stream.iter().copied().collect();
            stream.prune();
            let twice: Vec<Pipe> = stream.iter().copied().collect();
            prop_assert_eq!(once, twice);
        }
    }
}
