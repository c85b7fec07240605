use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::Params;

/// AI skill presets exposed to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Numeric skill in [0, 1] handed to the AI brain
    pub fn level(self) -> f32 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Medium => 0.7,
            Difficulty::Hard => 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be {rule}, got {value}")]
    OutOfRange {
        field: &'static str,
        rule: &'static str,
        value: f32,
    },
    #[error("{low} must not exceed {high}")]
    Inverted {
        low: &'static str,
        high: &'static str,
    },
}

fn check(field: &'static str, rule: &'static str, value: f32, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, rule, value })
    }
}

fn ordered(low: &'static str, a: f32, high: &'static str, b: f32) -> Result<(), ConfigError> {
    if a <= b {
        Ok(())
    } else {
        Err(ConfigError::Inverted { low, high })
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view_width: f32,
    pub court_far_y: f32,
    pub court_near_y: f32,
    pub court_far_width: f32,
    pub court_near_width: f32,
    pub kitchen_depth_ratio: f32,
    pub out_margin: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub player_home_y: f32,
    pub ai_home_y: f32,
    pub hit_animation_decay: f32,

    pub ball_size: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub power_speed_multiplier: f32,
    pub power_speed_max: f32,
    pub power_lift_multiplier: f32,
    pub power_burst_count: u16,
    pub power_shake: f32,
    pub max_deflection_deg: f32,
    pub serve_angle_deg: f32,
    pub trail_length: usize,

    pub gravity: f32,
    pub restitution: f32,
    pub bounce_threshold: f32,
    pub reach_height: f32,
    pub serve_height: f32,
    pub serve_lift_min: f32,
    pub serve_lift_max: f32,
    pub hit_lift_min: f32,
    pub hit_lift_max: f32,

    pub difficulty: Difficulty,
    pub ai_aim_error: f32,
    pub ai_dead_zone: f32,

    pub win_score: u8,
    pub win_margin: u8,
    pub serve_delay: f32,
    pub point_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_width: Params::VIEW_WIDTH,
            court_far_y: Params::COURT_FAR_Y,
            court_near_y: Params::COURT_NEAR_Y,
            court_far_width: Params::COURT_FAR_WIDTH,
            court_near_width: Params::COURT_NEAR_WIDTH,
            kitchen_depth_ratio: Params::KITCHEN_DEPTH_RATIO,
            out_margin: Params::OUT_MARGIN,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            player_home_y: Params::PLAYER_HOME_Y,
            ai_home_y: Params::AI_HOME_Y,
            hit_animation_decay: Params::HIT_ANIMATION_DECAY,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            power_speed_multiplier: Params::POWER_SPEED_MULTIPLIER,
            power_speed_max: Params::POWER_SPEED_MAX,
            power_lift_multiplier: Params::POWER_LIFT_MULTIPLIER,
            power_burst_count: Params::POWER_BURST_COUNT,
            power_shake: Params::POWER_SHAKE,
            max_deflection_deg: Params::MAX_DEFLECTION_DEG,
            serve_angle_deg: Params::SERVE_ANGLE_DEG,
            trail_length: Params::TRAIL_LENGTH,
            gravity: Params::GRAVITY,
            restitution: Params::RESTITUTION,
            bounce_threshold: Params::BOUNCE_THRESHOLD,
            reach_height: Params::REACH_HEIGHT,
            serve_height: Params::SERVE_HEIGHT,
            serve_lift_min: Params::SERVE_LIFT_MIN,
            serve_lift_max: Params::SERVE_LIFT_MAX,
            hit_lift_min: Params::HIT_LIFT_MIN,
            hit_lift_max: Params::HIT_LIFT_MAX,
            difficulty: Difficulty::default(),
            ai_aim_error: Params::AI_AIM_ERROR,
            ai_dead_zone: Params::AI_DEAD_ZONE,
            win_score: Params::WIN_SCORE,
            win_margin: Params::WIN_MARGIN,
            serve_delay: Params::SERVE_DELAY,
            point_delay: Params::POINT_DELAY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the simulation can't run with. NaN fails every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field, value: f32| check(field, "positive", value, value > 0.0);
        let non_negative = |field, value: f32| check(field, "non-negative", value, value >= 0.0);

        positive("view_width", self.view_width)?;
        check(
            "court_near_y",
            "beyond court_far_y",
            self.court_near_y,
            self.court_near_y > self.court_far_y,
        )?;
        positive("court_far_width", self.court_far_width)?;
        positive("court_near_width", self.court_near_width)?;
        check(
            "kitchen_depth_ratio",
            "in [0, 0.5]",
            self.kitchen_depth_ratio,
            (0.0..=0.5).contains(&self.kitchen_depth_ratio),
        )?;
        non_negative("out_margin", self.out_margin)?;

        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        non_negative("paddle_speed", self.paddle_speed)?;
        non_negative("hit_animation_decay", self.hit_animation_decay)?;

        positive("ball_size", self.ball_size)?;
        positive("ball_speed_initial", self.ball_speed_initial)?;
        ordered("ball_speed_initial", self.ball_speed_initial, "ball_speed_max", self.ball_speed_max)?;
        check(
            "ball_speed_increase",
            "at least 1",
            self.ball_speed_increase,
            self.ball_speed_increase >= 1.0,
        )?;
        positive("power_speed_multiplier", self.power_speed_multiplier)?;
        positive("power_speed_max", self.power_speed_max)?;
        positive("power_lift_multiplier", self.power_lift_multiplier)?;
        non_negative("power_shake", self.power_shake)?;
        check(
            "max_deflection_deg",
            "in [0, 90)",
            self.max_deflection_deg,
            (0.0..90.0).contains(&self.max_deflection_deg),
        )?;
        check(
            "serve_angle_deg",
            "in [0, 90)",
            self.serve_angle_deg,
            (0.0..90.0).contains(&self.serve_angle_deg),
        )?;
        check(
            "trail_length",
            "at least 1",
            self.trail_length as f32,
            self.trail_length >= 1,
        )?;

        positive("gravity", self.gravity)?;
        check(
            "restitution",
            "in [0, 1)",
            self.restitution,
            (0.0..1.0).contains(&self.restitution),
        )?;
        non_negative("bounce_threshold", self.bounce_threshold)?;
        positive("reach_height", self.reach_height)?;
        non_negative("serve_height", self.serve_height)?;
        non_negative("serve_lift_min", self.serve_lift_min)?;
        ordered("serve_lift_min", self.serve_lift_min, "serve_lift_max", self.serve_lift_max)?;
        non_negative("hit_lift_min", self.hit_lift_min)?;
        ordered("hit_lift_min", self.hit_lift_min, "hit_lift_max", self.hit_lift_max)?;

        non_negative("ai_aim_error", self.ai_aim_error)?;
        non_negative("ai_dead_zone", self.ai_dead_zone)?;

        check(
            "win_score",
            "at least 1",
            f32::from(self.win_score),
            self.win_score >= 1,
        )?;
        non_negative("serve_delay", self.serve_delay)?;
        non_negative("point_delay", self.point_delay)?;
        Ok(())
    }

    /// Horizontal centre of the court
    pub fn center_x(&self) -> f32 {
        self.view_width / 2.0
    }

    /// Top-left home position of a paddle
    pub fn paddle_home(&self, side: crate::Side) -> glam::Vec2 {
        let x = self.center_x() - self.paddle_width / 2.0;
        match side {
            crate::Side::Player => glam::Vec2::new(x, self.player_home_y),
            crate::Side::Ai => glam::Vec2::new(x, self.ai_home_y),
        }
    }
}
