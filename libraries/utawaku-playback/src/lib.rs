//! Utawaku - Segment Playback
//!
//! Plays trimmed segments of embedded videos back to back.
//!
//! This crate provides:
//! - A readiness-gated adapter over any [`EmbeddedPlayer`]
//! - Deferred seek: load from 0, seek once the player reports playing
//! - Ease-out volume fades on start, end, switch and stop
//! - A boundary watch that ends a segment at its trimmed end time
//! - Sequential (wrapping) and shuffled navigation
//! - Index tracking across playlist edits
//!
//! # Architecture
//!
//! The engine is single-threaded and tick-driven. The host owns the clock
//! and calls [`PlaybackEngine::tick`] once per frame; player callbacks may
//! arrive from anywhere through a cloned [`PlayerEventSender`] and are
//! drained at the start of each tick.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use utawaku_core::PlaylistStore;
//! use utawaku_playback::{
//!     player_channel, EngineConfig, EnginePhase, PlaybackEngine, PlayerAdapter, SimulatedPlayer,
//! };
//!
//! let playlist = PlaylistStore::with_defaults();
//!
//! let (callbacks, events) = player_channel();
//! let player = SimulatedPlayer::new(callbacks.clone());
//! callbacks.ready();
//!
//! let mut engine = PlaybackEngine::new(PlayerAdapter::new(player, events), EngineConfig::default());
//! let start = Instant::now();
//! engine.play_at(&playlist, 0, start).unwrap();
//! engine.tick(&playlist, start + Duration::from_millis(16));
//!
//! assert_eq!(engine.phase(), EnginePhase::Playing);
//! assert_eq!(engine.current_index(), Some(0));
//! ```

mod engine;
mod error;
pub mod events;
pub mod fade;
mod player;
mod shuffle;
mod sim;
pub mod types;
mod volume;
pub mod watch;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use fade::{ease_out_cubic, FadeController, FadeStep};
pub use player::{
    player_channel, EmbeddedPlayer, PlayerAdapter, PlayerEventReceiver, PlayerEventSender,
};
pub use shuffle::next_index;
pub use sim::{PlayerCommand, SimulatedPlayer, DEFAULT_VIDEO_SECS};
pub use types::{Direction, EndReason, EngineConfig, EnginePhase, PlayerState, Session};
pub use volume::Volume;
pub use watch::{Deadline, EndWatch};
