//! Playback Events
//!
//! Event-based communication for UI synchronization. The engine queues
//! events as it changes state; the host drains them once per tick with
//! [`crate::PlaybackEngine::drain_events`].

use crate::types::{EndReason, EnginePhase, PlayerState};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Engine state machine moved to a new phase
    PhaseChanged { phase: EnginePhase },

    /// Embedded player reported a new state
    PlayerStateChanged { state: PlayerState },

    /// Load and play were issued for a segment
    SegmentStarted {
        /// Playlist index of the segment
        index: usize,
        /// Video being loaded
        video_id: String,
    },

    /// A segment stopped playing and its end fade began
    SegmentFinished { index: usize, reason: EndReason },

    /// Selected segment changed (`None` when nothing is selected)
    CurrentIndexChanged { index: Option<usize> },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },

    /// The player never confirmed playback of a load
    PlayerUnavailable { index: usize },
}
