//! Core types for segment playback

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// State reported by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded yet, or stopped/cued
    Unstarted,

    /// Media ran out
    Ended,

    /// Playing
    Playing,

    /// Paused mid-video
    Paused,

    /// Waiting for data
    Buffering,
}

impl PlayerState {
    /// Map a raw player state code
    ///
    /// Codes: -1 unstarted, 0 ended, 1 playing, 2 paused, 3 buffering,
    /// 5 cued (reported as unstarted). Unknown codes map to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 | 5 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            _ => None,
        }
    }

    /// Raw code for this state
    pub fn code(self) -> i32 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
        }
    }

    /// Whether the player may currently be producing sound
    pub fn is_audible(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }
}

/// Engine state machine phase
///
/// ```text
/// Idle -> (Switching) -> Loading -> Playing -> Finishing -> Settling -> Loading ...
///                                      \-> Stopping -> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Nothing selected
    #[default]
    Idle,

    /// Fading out the previous segment before loading the next
    Switching,

    /// Load and play issued, waiting for the player to confirm playback
    Loading,

    /// Seek applied, boundary watch armed
    Playing,

    /// Boundary hit or media ended, fading out
    Finishing,

    /// Paused after the fade, waiting out the settle delay before advancing
    Settling,

    /// Fading out before a stop
    Stopping,
}

/// Direction for next/previous navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// Why a segment stopped playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Playback reached the trimmed end time
    Boundary,

    /// The player reported that the media ended
    NaturalEnd,
}

/// Ephemeral playback session, owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    /// Index of the selected segment in the playlist
    pub current_index: Option<usize>,

    /// Seconds to seek to once the player confirms playback
    pub pending_seek: Option<f64>,

    /// Boundary to arm once the player confirms playback
    pub pending_end_boundary: Option<f64>,

    /// Random next/previous selection
    pub shuffle_enabled: bool,

    /// State machine phase
    pub phase: EnginePhase,
}

/// Configuration for the playback engine
///
/// All timings are tunable; the defaults match what sounds right with the
/// embedded player's typical latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How early before the end time the boundary fires (default: 0.3 s)
    pub boundary_epsilon_secs: f64,

    /// Pause between the end fade and advancing (default: 300 ms)
    pub settle_delay_ms: u64,

    /// Fade-out before switching away from an audible segment (default: 500 ms)
    pub switch_fade_ms: u64,

    /// Fade-in once a segment starts (default: 500 ms)
    pub fade_in_ms: u64,

    /// Fade-out when a segment ends (default: 500 ms)
    pub end_fade_ms: u64,

    /// Fade-out for `fade_out_and_stop` (default: 800 ms)
    pub stop_fade_ms: u64,

    /// Output volume 0-100 (default: 100)
    pub volume: u8,

    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,

    /// Give up on a load that never starts playing (default: 10 s, `None` waits forever)
    pub ready_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boundary_epsilon_secs: 0.3,
            settle_delay_ms: 300,
            switch_fade_ms: 500,
            fade_in_ms: 500,
            end_fade_ms: 500,
            stop_fade_ms: 800,
            volume: 100,
            shuffle: false,
            ready_timeout_ms: Some(10_000),
        }
    }
}

impl EngineConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn switch_fade(&self) -> Duration {
        Duration::from_millis(self.switch_fade_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn end_fade(&self) -> Duration {
        Duration::from_millis(self.end_fade_ms)
    }

    pub fn stop_fade(&self) -> Duration {
        Duration::from_millis(self.stop_fade_ms)
    }

    pub fn ready_timeout(&self) -> Option<Duration> {
        self.ready_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.boundary_epsilon_secs, 0.3);
        assert_eq!(config.settle_delay(), Duration::from_millis(300));
        assert_eq!(config.volume, 100);
        assert!(!config.shuffle);
        assert_eq!(config.ready_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn state_codes_round_trip() {
        for state in [
            PlayerState::Unstarted,
            PlayerState::Ended,
            PlayerState::Playing,
            PlayerState::Paused,
            PlayerState::Buffering,
        ] {
            assert_eq!(PlayerState::from_code(state.code()), Some(state));
        }
        assert_eq!(PlayerState::from_code(5), Some(PlayerState::Unstarted));
        assert_eq!(PlayerState::from_code(42), None);
    }
}
