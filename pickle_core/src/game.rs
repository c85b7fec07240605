//! Match state machine.
//!
//! `Match` owns the world, the score and the pending countdown, and advances
//! them frame by frame. Hosts feed it input and `update(dt)`, then drain
//! `events` for sound, particles and leaderboard traffic.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, info};

use crate::{
    create_ai_paddle, create_ball, create_paddle, step, AiBrain, Ball, Config, Countdown, Court,
    Difficulty, Events, InputState, LeaderboardRequest, Paddle, PointReason, RandomSource, Score,
    Side, SoundCue, Time, Trail,
};

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Start,
    Serving,
    Playing,
    Paused,
    PointWon,
    GameOver,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Begin,
    ServeElapsed,
    TogglePause,
    PointScored,
    ServeNext,
    MatchDecided,
    Reset,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: GamePhase,
    pub to: GamePhase,
    pub action: GameAction,
}

/// Next phase for an action, if the action is valid in `phase`
pub fn next_phase(phase: GamePhase, action: GameAction) -> Option<GamePhase> {
    match (phase, action) {
        // Always allowed
        (_, GameAction::Reset) => Some(GamePhase::Start),

        (GamePhase::Start, GameAction::Begin) => Some(GamePhase::Serving),

        (GamePhase::Serving, GameAction::ServeElapsed) => Some(GamePhase::Playing),

        // From Playing
        (GamePhase::Playing, GameAction::TogglePause) => Some(GamePhase::Paused),
        (GamePhase::Playing, GameAction::PointScored) => Some(GamePhase::PointWon),

        (GamePhase::Paused, GameAction::TogglePause) => Some(GamePhase::Playing),

        // From PointWon
        (GamePhase::PointWon, GameAction::ServeNext) => Some(GamePhase::Serving),
        (GamePhase::PointWon, GameAction::MatchDecided) => Some(GamePhase::GameOver),

        (GamePhase::GameOver, GameAction::Begin) => Some(GamePhase::Serving),

        // Invalid transition
        _ => None,
    }
}

/// One human-vs-AI game to 11, win by 2
pub struct Match {
    pub world: World,
    pub time: Time,
    pub court: Court,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub input: InputState,
    pub server: Side,
    phase: GamePhase,
    countdown: Countdown,
    rng: Box<dyn RandomSource>,
    human: Entity,
    opponent: Entity,
    ball: Entity,
}

impl Match {
    pub fn new(config: Config, rng: Box<dyn RandomSource>) -> Self {
        let court = Court::new(&config);
        let mut world = World::new();
        let human = create_paddle(&mut world, Side::Player, &config);
        let opponent = create_ai_paddle(&mut world, Side::Ai, &config);
        let ball = create_ball(&mut world, &config);

        let mut game = Self {
            world,
            time: Time::default(),
            court,
            config,
            score: Score::new(),
            events: Events::new(),
            input: InputState::new(),
            server: Side::Player,
            phase: GamePhase::Start,
            countdown: Countdown::new(),
            rng,
            human,
            opponent,
            ball,
        };
        game.set_difficulty(game.config.difficulty);
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        next_phase(self.phase, action).is_some()
    }

    /// Attempt a transition; invalid actions leave the phase untouched
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from = self.phase;
        match next_phase(from, action) {
            Some(to) => {
                debug!(?from, ?to, ?action, "phase transition");
                self.phase = to;
                TransitionResult {
                    success: true,
                    from,
                    to,
                    action,
                }
            }
            None => {
                debug!(phase = ?from, ?action, "rejected phase transition");
                TransitionResult {
                    success: false,
                    from,
                    to: from,
                    action,
                }
            }
        }
    }

    /// Start a game from the title screen or after a finished one
    pub fn start(&mut self) -> TransitionResult {
        if matches!(self.phase, GamePhase::Start | GamePhase::GameOver) {
            self.new_game();
        }
        let result = self.transition(GameAction::Begin);
        if result.success {
            self.begin_serve();
        }
        result
    }

    pub fn toggle_pause(&mut self) -> TransitionResult {
        self.transition(GameAction::TogglePause)
    }

    /// Back to the title screen, dropping the score and any pending delay
    pub fn reset(&mut self) {
        self.transition(GameAction::Reset);
        self.new_game();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        if let Ok(mut brain) = self.world.get::<&mut AiBrain>(self.opponent) {
            brain.set_difficulty(difficulty.level());
        }
    }

    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Advance the match by one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.events.clear();
        let dt = dt.max(0.0);

        match self.phase {
            GamePhase::Serving => {
                if self.countdown.tick(dt) {
                    self.launch_serve();
                }
            }
            GamePhase::Playing => {
                self.time.dt = dt;
                let point = step(
                    &mut self.world,
                    &self.time,
                    &self.court,
                    &self.config,
                    &self.input,
                    &mut self.events,
                    self.rng.as_mut(),
                );
                if let Some((winner, reason)) = point {
                    self.award_point(winner, reason);
                }
            }
            GamePhase::PointWon => {
                if self.countdown.tick(dt) && self.transition(GameAction::ServeNext).success {
                    self.begin_serve();
                }
            }
            GamePhase::Start | GamePhase::Paused | GamePhase::GameOver => {}
        }
    }

    /// Scores zeroed, player to serve, everything back home
    fn new_game(&mut self) {
        self.score = Score::new();
        self.server = Side::Player;
        self.countdown.cancel();
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.reset();
        }
        self.reset_rally();
    }

    fn reset_rally(&mut self) {
        let center_x = self.court.center_x;
        for (_entity, brain) in self.world.query_mut::<&mut AiBrain>() {
            brain.reset(center_x);
        }
        if let Ok((ball, trail)) = self.world.query_one_mut::<(&mut Ball, &mut Trail)>(self.ball) {
            ball.reset(&self.config);
            trail.clear();
        }
    }

    fn begin_serve(&mut self) {
        self.reset_rally();
        self.countdown.start(self.config.serve_delay);
    }

    fn launch_serve(&mut self) {
        if !self.transition(GameAction::ServeElapsed).success {
            return;
        }
        let server = self.server;
        let rng = self.rng.as_mut();
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.serve(server.attack_direction(), &self.config, rng);
            ball.last_hit_by = Some(server);
            debug!(?server, vel = ?ball.vel, vz = ball.vz, "serve");
        }
    }

    fn award_point(&mut self, winner: Side, reason: PointReason) {
        self.score.award(winner);
        self.server = winner;
        self.transition(GameAction::PointScored);
        self.events.point = Some((winner, reason));
        self.events.play(SoundCue::PointScored);
        info!(
            ?winner,
            ?reason,
            player = self.score.player,
            ai = self.score.ai,
            "point"
        );

        match self.score.winner(self.config.win_score, self.config.win_margin) {
            Some(champion) => {
                self.transition(GameAction::MatchDecided);
                self.events.game_over = Some(champion);
                if champion == Side::Player {
                    self.events.play(SoundCue::Win);
                    self.events.leaderboard.push(LeaderboardRequest::SubmitScore {
                        player: self.score.player,
                        ai: self.score.ai,
                    });
                } else {
                    self.events.play(SoundCue::Lose);
                }
                self.events.leaderboard.push(LeaderboardRequest::FetchRank);
                info!(
                    ?champion,
                    player = self.score.player,
                    ai = self.score.ai,
                    "game over"
                );
            }
            None => self.countdown.start(self.config.point_delay),
        }
    }

    /// Whether a serve or next-point delay is still running
    pub fn delay_pending(&self) -> bool {
        self.countdown.is_pending()
    }

    pub fn entity(&self, side: Side) -> Entity {
        match side {
            Side::Player => self.human,
            Side::Ai => self.opponent,
        }
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| *ball)
    }

    /// Direct access to the ball, for scripted scenarios
    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.world.query_one_mut::<&mut Ball>(self.ball).ok()
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .get::<&Paddle>(self.entity(side))
            .ok()
            .map(|paddle| *paddle)
    }

    pub fn paddle_mut(&mut self, side: Side) -> Option<&mut Paddle> {
        let entity = self.entity(side);
        self.world.query_one_mut::<&mut Paddle>(entity).ok()
    }

    /// Trail points, oldest first
    pub fn trail(&self) -> Vec<Vec2> {
        self.world
            .get::<&Trail>(self.ball)
            .map(|trail| trail.points.iter().copied().collect())
            .unwrap_or_default()
    }
}
