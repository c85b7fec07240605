/// Game tuning parameters for the pickleball court
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen space the court is laid out in
    pub const VIEW_WIDTH: f32 = 600.0;
    pub const VIEW_HEIGHT: f32 = 800.0;

    // Court (trapezoid: narrow far end, wide near end)
    pub const COURT_FAR_Y: f32 = 150.0;
    pub const COURT_NEAR_Y: f32 = 650.0;
    pub const COURT_FAR_WIDTH: f32 = 360.0;
    pub const COURT_NEAR_WIDTH: f32 = 560.0;
    pub const KITCHEN_DEPTH_RATIO: f32 = 0.175; // of full court depth, per side
    pub const OUT_MARGIN: f32 = 50.0; // grace past the baselines

    // Paddle (player character bounding box)
    pub const PADDLE_WIDTH: f32 = 40.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    pub const PADDLE_SPEED: f32 = 400.0; // units per second
    pub const PLAYER_HOME_Y: f32 = 590.0;
    pub const AI_HOME_Y: f32 = 160.0;
    pub const HIT_ANIMATION_DECAY: f32 = 5.0; // full swing fades in 0.2s

    // Ball
    pub const BALL_SIZE: f32 = 14.0;
    pub const BALL_SPEED_INITIAL: f32 = 300.0;
    pub const BALL_SPEED_MAX: f32 = 800.0;
    pub const BALL_SPEED_INCREASE: f32 = 1.05; // Multiply speed on paddle hit
    pub const POWER_SPEED_MULTIPLIER: f32 = 1.5;
    pub const POWER_SPEED_MAX: f32 = 1000.0;
    pub const POWER_LIFT_MULTIPLIER: f32 = 1.4;
    pub const POWER_BURST_COUNT: u16 = 30;
    pub const POWER_SHAKE: f32 = 10.0;
    pub const MAX_DEFLECTION_DEG: f32 = 20.0;
    pub const SERVE_ANGLE_DEG: f32 = 25.0;
    pub const TRAIL_LENGTH: usize = 10;

    // Height / bounce
    pub const GRAVITY: f32 = 800.0;
    pub const RESTITUTION: f32 = 0.6;
    pub const BOUNCE_THRESHOLD: f32 = 50.0; // slower impacts settle instead
    pub const REACH_HEIGHT: f32 = 60.0; // paddles only touch a ball below this
    pub const SERVE_HEIGHT: f32 = 20.0;
    pub const SERVE_LIFT_MIN: f32 = 250.0;
    pub const SERVE_LIFT_MAX: f32 = 320.0;
    pub const HIT_LIFT_MIN: f32 = 200.0;
    pub const HIT_LIFT_MAX: f32 = 300.0;

    // AI
    pub const AI_DIFFICULTY: f32 = 0.85;
    pub const AI_REACTION_DELAY: f32 = 0.1;
    pub const AI_AIM_ERROR: f32 = 100.0; // at difficulty 0
    pub const AI_DEAD_ZONE: f32 = 5.0;

    // Score
    pub const WIN_SCORE: u8 = 11;
    pub const WIN_MARGIN: u8 = 2;

    // Match timing
    pub const SERVE_DELAY: f32 = 1.0;
    pub const POINT_DELAY: f32 = 1.5;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 120.0;
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
}
