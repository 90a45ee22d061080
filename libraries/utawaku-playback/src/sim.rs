//! In-process stand-in for an embedded player
//!
//! Keeps a virtual playhead that only moves when [`SimulatedPlayer::advance`]
//! is called, records every command it receives and reports state changes
//! through a [`PlayerEventSender`] the way a real player's callbacks would.
//! Used by the CLI `simulate` command and by the engine tests.

use crate::player::{EmbeddedPlayer, PlayerEventSender};
use crate::types::PlayerState;
use std::collections::HashMap;
use std::time::Duration;

/// Video length used when none was configured
pub const DEFAULT_VIDEO_SECS: f64 = 300.0;

/// A command received by the simulated player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Load { video_id: String, start: f64 },
    Play,
    Pause,
    Stop,
    Seek(f64),
    SetVolume(u8),
}

/// Deterministic [`EmbeddedPlayer`] with a manually driven clock
#[derive(Debug)]
pub struct SimulatedPlayer {
    events: PlayerEventSender,
    commands: Vec<PlayerCommand>,
    video_id: Option<String>,
    position: f64,
    state: PlayerState,
    volume: u8,
    durations: HashMap<String, f64>,
    default_duration: f64,
    auto_confirm: bool,
}

impl SimulatedPlayer {
    pub fn new(events: PlayerEventSender) -> Self {
        Self {
            events,
            commands: Vec::new(),
            video_id: None,
            position: 0.0,
            state: PlayerState::Unstarted,
            volume: 100,
            durations: HashMap::new(),
            default_duration: DEFAULT_VIDEO_SECS,
            auto_confirm: true,
        }
    }

    /// Set the natural length of one video
    pub fn with_duration(mut self, video_id: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(video_id.into(), seconds);
        self
    }

    /// Set the length of videos without an explicit duration
    pub fn with_default_duration(mut self, seconds: f64) -> Self {
        self.default_duration = seconds;
        self
    }

    /// Stay buffering after `play` until [`SimulatedPlayer::confirm_playing`]
    pub fn manual_confirm(mut self) -> Self {
        self.auto_confirm = false;
        self
    }

    /// Report readiness, as the real player does once its API loads
    pub fn signal_ready(&self) {
        self.events.ready();
    }

    /// Finish buffering and report `Playing`
    pub fn confirm_playing(&mut self) {
        if self.video_id.is_some() {
            self.transition(PlayerState::Playing);
        }
    }

    /// Move the playhead forward while playing
    ///
    /// Reports `Ended` when the playhead reaches the video's length.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state != PlayerState::Playing {
            return;
        }
        self.position += elapsed.as_secs_f64();
        let duration = self.duration();
        if self.position >= duration {
            self.position = duration;
            self.transition(PlayerState::Ended);
        }
    }

    /// Jump the playhead without reporting anything
    pub fn set_position(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    /// Every command received, in order
    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Commands other than volume changes
    pub fn transport_commands(&self) -> Vec<PlayerCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, PlayerCommand::SetVolume(_)))
            .cloned()
            .collect()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    fn duration(&self) -> f64 {
        self.video_id
            .as_ref()
            .and_then(|id| self.durations.get(id))
            .copied()
            .unwrap_or(self.default_duration)
    }

    fn transition(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.events.state_changed(state.code());
        }
    }
}

impl EmbeddedPlayer for SimulatedPlayer {
    fn load_video(&mut self, video_id: &str, start_seconds: f64) {
        self.commands.push(PlayerCommand::Load {
            video_id: video_id.to_string(),
            start: start_seconds,
        });
        self.video_id = Some(video_id.to_string());
        self.position = start_seconds.max(0.0);
        self.state = PlayerState::Unstarted;
        self.transition(PlayerState::Buffering);
    }

    fn play_video(&mut self) {
        self.commands.push(PlayerCommand::Play);
        if self.video_id.is_none() {
            return;
        }
        if self.auto_confirm || self.state == PlayerState::Paused {
            self.transition(PlayerState::Playing);
        }
    }

    fn pause_video(&mut self) {
        self.commands.push(PlayerCommand::Pause);
        if matches!(self.state, PlayerState::Playing | PlayerState::Buffering) {
            self.transition(PlayerState::Paused);
        }
    }

    fn stop_video(&mut self) {
        self.commands.push(PlayerCommand::Stop);
        self.position = 0.0;
        self.transition(PlayerState::Unstarted);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.commands.push(PlayerCommand::Seek(seconds));
        let duration = self.duration();
        self.position = seconds.clamp(0.0, duration);
        if self.position >= duration {
            self.transition(PlayerState::Ended);
        }
    }

    fn set_volume(&mut self, percent: u8) {
        self.commands.push(PlayerCommand::SetVolume(percent));
        self.volume = percent.min(100);
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn state_code(&self) -> i32 {
        self.state.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{player_channel, PlayerAdapter, PlayerEventReceiver};

    #[test]
    fn load_then_play_reports_buffering_then_playing() {
        let (tx, rx) = player_channel();
        let mut adapter = PlayerAdapter::new(SimulatedPlayer::new(tx.clone()), rx);
        tx.ready();

        adapter.load("dQw4w9WgXcQ", 0.0);
        adapter.play();
        assert_eq!(adapter.poll_event(), Some(PlayerState::Buffering));
        assert_eq!(adapter.poll_event(), Some(PlayerState::Playing));
        assert_eq!(adapter.poll_event(), None);
        assert_eq!(
            adapter.player().transport_commands(),
            vec![
                PlayerCommand::Load {
                    video_id: "dQw4w9WgXcQ".to_string(),
                    start: 0.0
                },
                PlayerCommand::Play
            ]
        );
    }

    #[test]
    fn playhead_ends_at_duration() {
        let (tx, rx) = player_channel();
        let mut player = SimulatedPlayer::new(tx).with_duration("dQw4w9WgXcQ", 10.0);
        player.load_video("dQw4w9WgXcQ", 0.0);
        player.play_video();
        player.advance(Duration::from_secs(4));
        assert_eq!(player.position(), 4.0);

        player.advance(Duration::from_secs(20));
        assert_eq!(player.position(), 10.0);
        assert_eq!(player.state(), PlayerState::Ended);

        assert_eq!(rx_codes(rx), vec![3, 1, 0]);
    }

    #[test]
    fn manual_confirm_waits() {
        let (tx, _rx) = player_channel();
        let mut player = SimulatedPlayer::new(tx).manual_confirm();
        player.load_video("dQw4w9WgXcQ", 0.0);
        player.play_video();
        assert_eq!(player.state(), PlayerState::Buffering);

        player.confirm_playing();
        assert_eq!(player.state(), PlayerState::Playing);
    }

    fn rx_codes(rx: PlayerEventReceiver) -> Vec<i32> {
        let mut adapter = PlayerAdapter::new(SimulatedPlayer::new(player_channel().0), rx);
        std::iter::from_fn(|| adapter.poll_event())
            .map(PlayerState::code)
            .collect()
    }
}
