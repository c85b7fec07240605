//! Wire format between the pickleball core and its hosts
//!
//! Uses postcard for efficient binary serialization

use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Host -> Core
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    /// Start a game from the title or game-over screen
    Start,
    TogglePause,
    /// Back to the title screen
    Reset,
    SetDifficulty(Level),
    /// Held keys for the human player
    Input {
        move_left: bool,
        move_right: bool,
        power_shot: bool,
    },
}

// ============================================================================
// Core -> Host
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Start,
    Serving,
    Playing,
    Paused,
    PointWon,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaddleState {
    pub x: f32, // top-left
    pub y: f32,
    pub left_handed: bool,
    pub swing: f32, // 1 = just struck, 0 = idle
}

/// Render snapshot of one frame
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub tick: u32,
    pub phase: Phase,
    pub score_player: u8,
    pub score_ai: u8,
    pub ball_x: f32, // top-left, court plane
    pub ball_y: f32,
    pub ball_height: f32, // shadow stays at (ball_x, ball_y)
    pub trail: Vec<(f32, f32)>,
    pub kitchen: (f32, f32), // depth span of the non-volley zone, far edge first
    pub player: PaddleState,
    pub ai: PaddleState,
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl Command {
    /// Serialize command to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize command from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl Frame {
    /// Serialize frame to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize frame from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }

    /// Length-prefixed encoding for streaming frames into a file
    pub fn to_record(&self) -> Result<Vec<u8>, postcard::Error> {
        let body = self.to_bytes()?;
        let mut record = Vec::with_capacity(body.len() + 4);
        record.extend_from_slice(&(body.len() as u32).to_le_bytes());
        record.extend_from_slice(&body);
        Ok(record)
    }

    /// Split every complete record out of a recording.
    ///
    /// A truncated record at the end is ignored.
    pub fn read_records(mut bytes: &[u8]) -> Result<Vec<Self>, postcard::Error> {
        let mut frames = Vec::new();
        while bytes.len() >= 4 {
            let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
            let rest = &bytes[4..];
            if rest.len() < len {
                break;
            }
            frames.push(Self::from_bytes(&rest[..len])?);
            bytes = &rest[len..];
        }
        Ok(frames)
    }
}
