//! Glue between a running match and the wire types

use glam::Vec2;
use pickle_core::{
    AiBrain, AudioSink, Difficulty, EffectsSink, GamePhase, Hand, InputState, Match, Paddle,
    Side, SoundCue,
};
use proto::{Command, Frame, Level, PaddleState, Phase};
use tracing::{debug, info};

/// Sound cues go to the log
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "sound");
    }
}

/// Particle bursts and screen shake go to the log
#[derive(Debug, Default)]
pub struct LogEffects;

impl EffectsSink for LogEffects {
    fn burst(&mut self, pos: Vec2, count: u16) {
        debug!(x = pos.x, y = pos.y, count, "particle burst");
    }

    fn shake(&mut self, intensity: f32) {
        debug!(intensity, "screen shake");
    }
}

/// Hand the human paddle to a brain of its own
pub fn attach_autopilot(game: &mut Match, skill: f32) -> anyhow::Result<()> {
    let mut brain = AiBrain::new(game.court.center_x);
    brain.set_difficulty(skill);
    let human = game.entity(Side::Player);
    game.world
        .insert_one(human, brain)
        .map_err(|_| anyhow::anyhow!("human paddle missing from the world"))?;
    info!(skill, "autopilot attached to the human paddle");
    Ok(())
}

pub fn difficulty(level: Level) -> Difficulty {
    match level {
        Level::Easy => Difficulty::Easy,
        Level::Medium => Difficulty::Medium,
        Level::Hard => Difficulty::Hard,
    }
}

/// Apply one host command to the match
pub fn apply(game: &mut Match, command: Command) {
    match command {
        Command::Start => {
            game.start();
        }
        Command::TogglePause => {
            game.toggle_pause();
        }
        Command::Reset => game.reset(),
        Command::SetDifficulty(level) => game.set_difficulty(difficulty(level)),
        Command::Input {
            move_left,
            move_right,
            power_shot,
        } => game.set_input(InputState {
            move_left,
            move_right,
            power_shot,
        }),
    }
}

fn phase(phase: GamePhase) -> Phase {
    match phase {
        GamePhase::Start => Phase::Start,
        GamePhase::Serving => Phase::Serving,
        GamePhase::Playing => Phase::Playing,
        GamePhase::Paused => Phase::Paused,
        GamePhase::PointWon => Phase::PointWon,
        GamePhase::GameOver => Phase::GameOver,
    }
}

fn paddle_state(paddle: Option<Paddle>) -> PaddleState {
    match paddle {
        Some(paddle) => PaddleState {
            x: paddle.pos.x,
            y: paddle.pos.y,
            left_handed: paddle.hand == Hand::Left,
            swing: paddle.hit_animation,
        },
        None => PaddleState {
            x: 0.0,
            y: 0.0,
            left_handed: false,
            swing: 0.0,
        },
    }
}

/// Render snapshot of the match as it stands
pub fn snapshot(game: &Match, tick: u32) -> Frame {
    let (kitchen_far, _) = game.court.kitchen_band(Side::Ai);
    let (_, kitchen_near) = game.court.kitchen_band(Side::Player);
    let (ball_x, ball_y, ball_height) = game
        .ball()
        .map(|ball| (ball.pos.x, ball.pos.y, ball.height))
        .unwrap_or_default();

    Frame {
        tick,
        phase: phase(game.phase()),
        score_player: game.score.player,
        score_ai: game.score.ai,
        ball_x,
        ball_y,
        ball_height,
        trail: game.trail().into_iter().map(|p| (p.x, p.y)).collect(),
        kitchen: (kitchen_far, kitchen_near),
        player: paddle_state(game.paddle(Side::Player)),
        ai: paddle_state(game.paddle(Side::Ai)),
    }
}
