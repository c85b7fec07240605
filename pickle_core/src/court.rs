use glam::Vec2;

use crate::{Config, Side};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_top_left_size(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left, top_left + size)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Trapezoidal court seen in forward perspective.
///
/// Depth runs from `far_y` (AI baseline) to `near_y` (player baseline). The
/// playable width grows linearly from `far_width` to `near_width` with depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub center_x: f32,
    pub far_y: f32,
    pub near_y: f32,
    pub far_width: f32,
    pub near_width: f32,
    pub kitchen_depth: f32,
    pub out_margin: f32,
}

impl Court {
    pub fn new(config: &Config) -> Self {
        let depth = config.court_near_y - config.court_far_y;
        Self {
            center_x: config.center_x(),
            far_y: config.court_far_y,
            near_y: config.court_near_y,
            far_width: config.court_far_width,
            near_width: config.court_near_width,
            kitchen_depth: depth * config.kitchen_depth_ratio,
            out_margin: config.out_margin,
        }
    }

    pub fn depth(&self) -> f32 {
        self.near_y - self.far_y
    }

    pub fn net_y(&self) -> f32 {
        (self.far_y + self.near_y) / 2.0
    }

    /// Depth progress in [0, 1]; 0 at the far baseline, 1 at the near one
    pub fn progress(&self, y: f32) -> f32 {
        let depth = self.depth();
        if depth <= 0.0 {
            return 0.0;
        }
        ((y - self.far_y) / depth).clamp(0.0, 1.0)
    }

    pub fn width_at(&self, y: f32) -> f32 {
        self.far_width + (self.near_width - self.far_width) * self.progress(y)
    }

    pub fn left_at(&self, y: f32) -> f32 {
        self.center_x - self.width_at(y) / 2.0
    }

    pub fn right_at(&self, y: f32) -> f32 {
        self.center_x + self.width_at(y) / 2.0
    }

    /// Which player's half a depth coordinate falls on
    pub fn side_of(&self, y: f32) -> Side {
        if y < self.net_y() {
            Side::Ai
        } else {
            Side::Player
        }
    }

    /// Depth span of the non-volley zone on one side of the net
    pub fn kitchen_band(&self, side: Side) -> (f32, f32) {
        let net = self.net_y();
        match side {
            Side::Ai => (net - self.kitchen_depth, net),
            Side::Player => (net, net + self.kitchen_depth),
        }
    }

    /// Out-of-bounds test for the ball's box: side lines at the ball's depth,
    /// baselines extended by the grace margin.
    pub fn is_out(&self, ball: &Aabb) -> bool {
        let y = ball.center().y;
        ball.min.x < self.left_at(y)
            || ball.max.x > self.right_at(y)
            || ball.min.y < self.far_y - self.out_margin
            || ball.max.y > self.near_y + self.out_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court() -> Court {
        Court::new(&Config::new())
    }

    #[test]
    fn test_width_matches_baselines() {
        let court = court();
        assert_eq!(court.width_at(court.far_y), court.far_width);
        assert_eq!(court.width_at(court.near_y), court.near_width);
    }

    #[test]
    fn test_width_monotonic_between_baselines() {
        let court = court();
        let mut last = court.width_at(court.far_y);
        for i in 1..=50 {
            let y = court.far_y + court.depth() * (i as f32 / 50.0);
            let w = court.width_at(y);
            assert!(w >= last, "Width should not shrink toward the near end");
            last = w;
        }
    }

    #[test]
    fn test_width_clamped_outside_court() {
        let court = court();
        assert_eq!(court.width_at(court.far_y - 500.0), court.far_width);
        assert_eq!(court.width_at(court.near_y + 500.0), court.near_width);
        assert!(court.width_at(-1.0e6) > 0.0);
    }

    #[test]
    fn test_degenerate_depth_does_not_divide_by_zero() {
        let mut court = court();
        court.near_y = court.far_y;
        assert_eq!(court.progress(1234.0), 0.0);
        assert_eq!(court.width_at(1234.0), court.far_width);
    }

    #[test]
    fn test_side_of_net() {
        let court = court();
        assert_eq!(court.side_of(court.net_y() - 1.0), Side::Ai);
        assert_eq!(court.side_of(court.net_y() + 1.0), Side::Player);
    }

    #[test]
    fn test_kitchen_straddles_net() {
        let court = court();
        let (ai_start, ai_end) = court.kitchen_band(Side::Ai);
        let (pl_start, pl_end) = court.kitchen_band(Side::Player);
        assert_eq!(ai_end, court.net_y());
        assert_eq!(pl_start, court.net_y());
        assert!((pl_end - pl_start - (ai_end - ai_start)).abs() < 1e-4);
        assert!(ai_start > court.far_y && pl_end < court.near_y);
    }

    #[test]
    fn test_is_out_side_lines_follow_perspective() {
        let court = court();
        let size = Vec2::splat(14.0);
        // Just inside the near-end sideline is outside at the far end
        let x = court.left_at(court.near_y) + 1.0;
        let near = Aabb::from_top_left_size(Vec2::new(x, court.near_y - 7.0), size);
        let far = Aabb::from_top_left_size(Vec2::new(x, court.far_y + 5.0), size);
        assert!(!court.is_out(&near));
        assert!(court.is_out(&far));
    }

    #[test]
    fn test_is_out_baseline_grace() {
        let court = court();
        let size = Vec2::splat(14.0);
        let x = court.center_x;
        let behind = Aabb::from_top_left_size(Vec2::new(x, court.near_y + 10.0), size);
        assert!(!court.is_out(&behind), "Grace margin keeps the ball in play");
        let gone = Aabb::from_top_left_size(Vec2::new(x, court.near_y + court.out_margin), size);
        assert!(court.is_out(&gone));
        let over_far = Aabb::from_top_left_size(
            Vec2::new(x, court.far_y - court.out_margin - 1.0),
            size,
        );
        assert!(court.is_out(&over_far));
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let inside = Aabb::new(Vec2::splat(5.0), Vec2::splat(15.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }
}
