use std::collections::VecDeque;

use glam::Vec2;

use crate::{Aabb, Config, Court, RandomSource};

/// Which end of the court an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// Human, near end
    Player,
    /// Computer opponent, far end
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Depth direction a ball struck by this side travels (+1 = toward the near end)
    pub fn attack_direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Ai => 1.0,
        }
    }
}

/// Hand the paddle is held in, for the swing pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

/// Paddle component - a player character and the paddle it swings
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2, // top-left of the bounding box
    pub vel: Vec2,
    pub home: Vec2,
    pub hit_animation: f32, // 1 on contact, fades to 0
    pub hand: Hand,
}

impl Paddle {
    pub fn new(side: Side, home: Vec2) -> Self {
        Self {
            side,
            pos: home,
            vel: Vec2::ZERO,
            home,
            hit_animation: 0.0,
            hand: Hand::default(),
        }
    }

    pub fn is_human(&self) -> bool {
        self.side == Side::Player
    }

    /// Back to the home spot at the start of a game
    pub fn reset(&mut self) {
        self.pos = self.home;
        self.vel = Vec2::ZERO;
        self.hit_animation = 0.0;
    }

    pub fn hit(&mut self) {
        self.hit_animation = 1.0;
    }

    pub fn size(config: &Config) -> Vec2 {
        Vec2::new(config.paddle_width, config.paddle_height)
    }

    pub fn center(&self, config: &Config) -> Vec2 {
        self.pos + Self::size(config) * 0.5
    }

    pub fn aabb(&self, config: &Config) -> Aabb {
        Aabb::from_top_left_size(self.pos, Self::size(config))
    }

    /// Advance swing, pose and lateral movement for one tick
    pub fn update(
        &mut self,
        dt: f32,
        intent: &PaddleIntent,
        ball_center_x: f32,
        court: &Court,
        config: &Config,
    ) {
        self.hit_animation = (self.hit_animation - dt * config.hit_animation_decay).max(0.0);

        let center = self.center(config);
        self.hand = if ball_center_x < center.x {
            Hand::Left
        } else {
            Hand::Right
        };

        self.vel.x = intent.dir() * config.paddle_speed;
        self.pos.x += self.vel.x * dt;

        // Sidelines at this depth
        let left = court.left_at(center.y);
        let right = court.right_at(center.y) - config.paddle_width;
        self.pos.x = self.pos.x.min(right).max(left);
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub move_left: bool,
    pub move_right: bool,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            move_right: false,
        }
    }

    pub fn right() -> Self {
        Self {
            move_left: false,
            move_right: true,
        }
    }

    /// -1 = left, 0 = stop, 1 = right; left wins if both are held
    pub fn dir(&self) -> f32 {
        if self.move_left {
            -1.0
        } else if self.move_right {
            1.0
        } else {
            0.0
        }
    }

    pub fn stop(&mut self) {
        self.move_left = false;
        self.move_right = false;
    }
}

/// Ball component - planar motion plus height above the court
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2, // top-left of the bounding box
    pub vel: Vec2,
    pub height: f32,
    pub vz: f32, // positive = rising
    pub bounces: u8,
    pub last_bounce_side: Option<Side>,
    pub last_hit_by: Option<Side>,
    pub speed: f32,
}

impl Ball {
    pub fn new(config: &Config) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            height: 0.0,
            vz: 0.0,
            bounces: 0,
            last_bounce_side: None,
            last_hit_by: None,
            speed: config.ball_speed_initial,
        };
        ball.reset(config);
        ball
    }

    pub fn size(config: &Config) -> Vec2 {
        Vec2::splat(config.ball_size)
    }

    pub fn center(&self, config: &Config) -> Vec2 {
        self.pos + Self::size(config) * 0.5
    }

    pub fn aabb(&self, config: &Config) -> Aabb {
        Aabb::from_top_left_size(self.pos, Self::size(config))
    }

    /// Park the ball at the middle of the court at rest
    pub fn reset(&mut self, config: &Config) {
        let court = Court::new(config);
        let center = Vec2::new(court.center_x, court.net_y());
        self.pos = center - Self::size(config) * 0.5;
        self.vel = Vec2::ZERO;
        self.height = 0.0;
        self.vz = 0.0;
        self.bounces = 0;
        self.last_bounce_side = None;
        self.last_hit_by = None;
        self.speed = config.ball_speed_initial;
    }

    /// Launch toward one end: `direction` +1 heads for the near end, -1 for the far end
    pub fn serve(&mut self, direction: f32, config: &Config, rng: &mut dyn RandomSource) {
        let limit = config.serve_angle_deg;
        let angle = rng.range(-limit, limit).to_radians();

        self.vel = Vec2::new(
            angle.sin() * self.speed,
            angle.cos() * self.speed * direction.signum(),
        );
        self.vz = rng.range(config.serve_lift_min, config.serve_lift_max);
        self.height = config.serve_height;
        self.bounces = 0;
        self.last_bounce_side = None;
    }
}

/// Recent ball positions for the motion blur, oldest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    pub points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Vec2, max_len: usize) {
        self.points.push_back(point);
        while self.points.len() > max_len {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
