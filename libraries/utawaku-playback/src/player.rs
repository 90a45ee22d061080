//! Embedded player abstraction
//!
//! The platform supplies an [`EmbeddedPlayer`] (a web iframe bridge, a
//! desktop webview, or [`crate::SimulatedPlayer`] in tests) and reports its
//! asynchronous callbacks through a [`PlayerEventSender`]. [`PlayerAdapter`]
//! sits in between: it swallows commands until the player has signalled
//! readiness and turns raw state codes into [`PlayerState`].

use crate::types::PlayerState;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Commands understood by an embedded video player
///
/// Implementations forward these to the platform player. None of them block
/// or report failure; outcomes arrive later as state callbacks.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddedPlayer {
    /// Load a video and start buffering it from `start_seconds`
    fn load_video(&mut self, video_id: &str, start_seconds: f64);

    fn play_video(&mut self);

    fn pause_video(&mut self);

    fn stop_video(&mut self);

    fn seek_to(&mut self, seconds: f64);

    /// Set output volume (0-100)
    fn set_volume(&mut self, percent: u8);

    fn volume(&self) -> u8;

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Raw state code (-1, 0, 1, 2, 3 or 5)
    fn state_code(&self) -> i32;
}

/// Create a connected sender/receiver pair for player callbacks
pub fn player_channel() -> (PlayerEventSender, PlayerEventReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let ready = Arc::new(AtomicBool::new(false));
    (
        PlayerEventSender {
            tx,
            ready: Arc::clone(&ready),
        },
        PlayerEventReceiver { rx, ready },
    )
}

/// Handle given to the platform player's callbacks
///
/// Cheap to clone and safe to move to another thread.
#[derive(Debug, Clone)]
pub struct PlayerEventSender {
    tx: Sender<i32>,
    ready: Arc<AtomicBool>,
}

impl PlayerEventSender {
    /// The player finished initializing and accepts commands
    pub fn ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// The player changed state (raw code)
    pub fn state_changed(&self, code: i32) {
        // Receiver gone means the engine was dropped; nothing left to notify
        let _ = self.tx.send(code);
    }
}

/// Receiving side of [`player_channel`], owned by a [`PlayerAdapter`]
#[derive(Debug)]
pub struct PlayerEventReceiver {
    rx: Receiver<i32>,
    ready: Arc<AtomicBool>,
}

/// Readiness-gated wrapper around an [`EmbeddedPlayer`]
pub struct PlayerAdapter<P> {
    player: P,
    events: PlayerEventReceiver,
}

impl<P: EmbeddedPlayer> PlayerAdapter<P> {
    pub fn new(player: P, events: PlayerEventReceiver) -> Self {
        Self { player, events }
    }

    /// Whether the player has signalled readiness
    pub fn is_ready(&self) -> bool {
        self.events.ready.load(Ordering::Acquire)
    }

    fn gate(&self, command: &str) -> bool {
        let ready = self.is_ready();
        if !ready {
            trace!(command, "Player not ready, ignoring command");
        }
        ready
    }

    // ===== Commands =====

    pub fn load(&mut self, video_id: &str, start_seconds: f64) {
        if self.gate("load") {
            debug!(video_id, start_seconds, "Loading video");
            self.player.load_video(video_id, start_seconds);
        }
    }

    pub fn play(&mut self) {
        if self.gate("play") {
            self.player.play_video();
        }
    }

    pub fn pause(&mut self) {
        if self.gate("pause") {
            self.player.pause_video();
        }
    }

    pub fn stop(&mut self) {
        if self.gate("stop") {
            self.player.stop_video();
        }
    }

    pub fn seek(&mut self, seconds: f64) {
        if self.gate("seek") {
            debug!(seconds, "Seeking");
            self.player.seek_to(seconds);
        }
    }

    pub fn set_volume(&mut self, percent: u8) {
        if self.gate("set_volume") {
            self.player.set_volume(percent.min(100));
        }
    }

    // ===== Queries =====

    /// Player volume, 0 before readiness
    pub fn volume(&self) -> u8 {
        if self.is_ready() {
            self.player.volume()
        } else {
            0
        }
    }

    /// Playback position in seconds, 0 before readiness
    pub fn current_time(&self) -> f64 {
        if self.is_ready() {
            self.player.current_time()
        } else {
            0.0
        }
    }

    /// Current player state, `Unstarted` before readiness
    pub fn state(&self) -> PlayerState {
        if !self.is_ready() {
            return PlayerState::Unstarted;
        }
        PlayerState::from_code(self.player.state_code()).unwrap_or(PlayerState::Unstarted)
    }

    /// Take the next reported state change, skipping unknown codes
    pub fn poll_event(&mut self) -> Option<PlayerState> {
        loop {
            match self.events.rx.try_recv() {
                Ok(code) => match PlayerState::from_code(code) {
                    Some(state) => return Some(state),
                    None => warn!(code, "Unknown player state code"),
                },
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}
