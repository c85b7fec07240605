//! Seams to the collaborators outside the simulation: sound, visual
//! effects and the remote leaderboard.

use glam::Vec2;
use thiserror::Error;
use tracing::warn;

use crate::{Events, LeaderboardRequest, SoundCue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("leaderboard unavailable")]
    Unavailable,
    #[error("score rejected: {0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

pub trait EffectsSink {
    fn burst(&mut self, pos: Vec2, count: u16);
    fn shake(&mut self, intensity: f32);
}

/// Remote ranking keyed by the identity of whoever played the human side
pub trait Leaderboard {
    fn submit_score(&mut self, identity: &str, player: u8, ai: u8) -> Result<(), LeaderboardError>;
    fn fetch_rank(&mut self, identity: &str) -> Result<u32, LeaderboardError>;
}

/// Drops every cue and effect
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

impl EffectsSink for Silent {
    fn burst(&mut self, _pos: Vec2, _count: u16) {}
    fn shake(&mut self, _intensity: f32) {}
}

/// Leaderboard for builds with no backend configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLeaderboard;

impl Leaderboard for OfflineLeaderboard {
    fn submit_score(&mut self, _identity: &str, _player: u8, _ai: u8) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::Unavailable)
    }

    fn fetch_rank(&mut self, _identity: &str) -> Result<u32, LeaderboardError> {
        Err(LeaderboardError::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub identity: String,
    pub player: u8,
    pub ai: u8,
}

impl LeaderboardEntry {
    /// Point margin first, then points won
    fn key(&self) -> (i16, u8) {
        (i16::from(self.player) - i16::from(self.ai), self.player)
    }
}

/// In-process ranking table.
///
/// An identity ranks by its best entry (1 = best). An identity with no
/// entries ranks one past the bottom of the table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit_score(&mut self, identity: &str, player: u8, ai: u8) -> Result<(), LeaderboardError> {
        if identity.is_empty() {
            return Err(LeaderboardError::Rejected("no identity".to_string()));
        }
        if player <= ai {
            return Err(LeaderboardError::Rejected(format!(
                "{}-{} is not a winning score",
                player, ai
            )));
        }
        self.entries.push(LeaderboardEntry {
            identity: identity.to_string(),
            player,
            ai,
        });
        Ok(())
    }

    fn fetch_rank(&mut self, identity: &str) -> Result<u32, LeaderboardError> {
        let best = self
            .entries
            .iter()
            .filter(|entry| entry.identity == identity)
            .map(LeaderboardEntry::key)
            .max();
        let best = match best {
            Some(best) => best,
            None => return Ok(self.entries.len() as u32 + 1),
        };
        let better = self.entries.iter().filter(|entry| entry.key() > best).count();
        Ok(better as u32 + 1)
    }
}

/// Identity used when the host never names the player
pub const GUEST: &str = "guest";

/// Everything a host plugs into a running match
pub struct Collaborators {
    pub audio: Box<dyn AudioSink>,
    pub effects: Box<dyn EffectsSink>,
    pub leaderboard: Box<dyn Leaderboard>,
    /// Who the leaderboard records scores for
    pub identity: String,
    /// Message for the player about the last leaderboard exchange
    pub status: Option<String>,
}

impl Collaborators {
    pub fn new(
        audio: Box<dyn AudioSink>,
        effects: Box<dyn EffectsSink>,
        leaderboard: Box<dyn Leaderboard>,
    ) -> Self {
        Self {
            audio,
            effects,
            leaderboard,
            identity: GUEST.to_string(),
            status: None,
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    /// Everything silent, leaderboard offline
    pub fn silent() -> Self {
        Self::new(
            Box::new(Silent),
            Box::new(Silent),
            Box::new(OfflineLeaderboard),
        )
    }

    /// Forward one frame's events. Leaderboard failures end up in `status`.
    pub fn dispatch(&mut self, events: &Events) {
        for &cue in &events.cues {
            self.audio.play(cue);
        }
        for burst in &events.bursts {
            self.effects.burst(burst.pos, burst.count);
        }
        if events.shake > 0.0 {
            self.effects.shake(events.shake);
        }

        for request in &events.leaderboard {
            match *request {
                LeaderboardRequest::SubmitScore { player, ai } => {
                    match self.leaderboard.submit_score(&self.identity, player, ai) {
                        Ok(()) => self.status = Some(format!("Score {}-{} submitted", player, ai)),
                        Err(err) => self.fail("submit score", err),
                    }
                }
                LeaderboardRequest::FetchRank => match self.leaderboard.fetch_rank(&self.identity) {
                    Ok(rank) => self.status = Some(format!("Rank #{}", rank)),
                    Err(err) => self.fail("fetch rank", err),
                },
            }
        }
    }

    fn fail(&mut self, what: &str, err: LeaderboardError) {
        warn!(error = %err, "leaderboard {} failed", what);
        self.status = Some(format!("Leaderboard: {}", err));
    }
}
