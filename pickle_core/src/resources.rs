use glam::Vec2;

use crate::Side;

/// Frame time handed to the systems
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32, // Delta time for this step
}

impl Time {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 0.016 }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u8,
    pub ai: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Ai => self.ai = self.ai.saturating_add(1),
        }
    }

    pub fn of(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// Winner once someone reached `win_score` with a lead of at least `margin`
    pub fn winner(&self, win_score: u8, margin: u8) -> Option<Side> {
        if self.player.max(self.ai) < win_score || self.player.abs_diff(self.ai) < margin {
            return None;
        }
        if self.player > self.ai {
            Some(Side::Player)
        } else {
            Some(Side::Ai)
        }
    }
}

/// Source of gameplay randomness (serve angle, lift, AI error and slips)
pub trait RandomSource {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f32;

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit()
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible generator for real play
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f32 {
        use rand::Rng;
        self.0.gen::<f32>()
    }
}

/// Replays a fixed cycle of samples, for deterministic tests and replays
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Named audio triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PaddleHit,
    Bounce,
    PointScored,
    PowerShot,
    Win,
    Lose,
}

/// Particle burst request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub pos: Vec2,
    pub count: u16,
}

/// Requests for the remote leaderboard, sent once a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardRequest {
    SubmitScore { player: u8, ai: u8 },
    FetchRank,
}

/// Why a rally ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointReason {
    DoubleBounce,
    BouncedOut,
    OutOnTheFly,
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub cues: Vec<SoundCue>,
    pub bursts: Vec<Burst>,
    pub shake: f32, // strongest shake requested this frame, 0 = none
    pub leaderboard: Vec<LeaderboardRequest>,
    pub paddle_hit: Option<Side>,
    pub point: Option<(Side, PointReason)>,
    pub game_over: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
        self.bursts.clear();
        self.shake = 0.0;
        self.leaderboard.clear();
        self.paddle_hit = None;
        self.point = None;
        self.game_over = None;
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn request_shake(&mut self, intensity: f32) {
        self.shake = self.shake.max(intensity);
    }
}

/// Human controls as last reported by the input driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub power_shot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tick-driven delay before a pending phase change
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    pub remaining: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, delay: f32) {
        self.remaining = Some(delay.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`; true exactly once, on the tick the delay runs out
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) if left - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}
