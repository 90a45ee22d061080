//! Segment playback engine
//!
//! Drives an embedded player through a playlist of trimmed segments. The
//! engine is cooperative: the host calls [`PlaybackEngine::tick`] once per
//! frame with the current time, and every timed behavior (fades, the
//! boundary watch, the settle delay, the readiness timeout) advances from
//! there. Nothing runs in the background.
//!
//! Starting a segment is a deferred seek: the video is loaded from 0 and
//! played, and only when the player reports `Playing` does the engine seek
//! to the trim start, arm the boundary watch and fade in.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::fade::FadeController;
use crate::player::{EmbeddedPlayer, PlayerAdapter, PlayerEventSender};
use crate::shuffle::next_index;
use crate::types::{Direction, EndReason, EngineConfig, EnginePhase, PlayerState, Session};
use crate::volume::Volume;
use crate::watch::{Deadline, EndWatch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, warn};
use utawaku_core::{PlaylistChange, SegmentSource};

/// Playback engine
///
/// Holds the session (current index and pending start/end) but not the
/// playlist: every operation that needs segments borrows a
/// [`SegmentSource`], so the playlist can be edited between calls. Report
/// each edit through [`PlaybackEngine::on_playlist_change`].
pub struct PlaybackEngine<P> {
    adapter: PlayerAdapter<P>,
    config: EngineConfig,
    session: Session,
    volume: Volume,
    fade: FadeController,
    end_watch: EndWatch,
    settle: Deadline,
    ready_timeout: Deadline,
    rng: StdRng,
    events: Option<PlayerEventSender>,
    pending_events: Vec<PlaybackEvent>,
}

impl<P: EmbeddedPlayer> PlaybackEngine<P> {
    /// Create an engine around a player adapter
    pub fn new(adapter: PlayerAdapter<P>, config: EngineConfig) -> Self {
        let session = Session {
            shuffle_enabled: config.shuffle,
            ..Session::default()
        };

        Self {
            adapter,
            volume: Volume::new(config.volume),
            end_watch: EndWatch::new(config.boundary_epsilon_secs),
            session,
            config,
            fade: FadeController::new(),
            settle: Deadline::new(),
            ready_timeout: Deadline::new(),
            rng: StdRng::from_entropy(),
            events: None,
            pending_events: Vec::new(),
        }
    }

    /// Use a fixed seed for shuffle selection
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Keep a callback handle so hosts can reach it through the engine
    pub fn with_event_sender(mut self, sender: PlayerEventSender) -> Self {
        self.events = Some(sender);
        self
    }

    // ===== Queries =====

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> EnginePhase {
        self.session.phase
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index
    }

    pub fn is_shuffle(&self) -> bool {
        self.session.shuffle_enabled
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Last state reported by the player
    pub fn player_state(&self) -> PlayerState {
        self.adapter.state()
    }

    /// Boundary the watch is waiting for, if armed
    pub fn end_watch_boundary(&self) -> Option<f64> {
        self.end_watch.boundary()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    /// Whether the post-fade settle delay is running
    pub fn is_settling(&self) -> bool {
        self.settle.is_pending()
    }

    pub fn adapter(&self) -> &PlayerAdapter<P> {
        &self.adapter
    }

    pub fn player(&self) -> &P {
        self.adapter.player()
    }

    pub fn player_mut(&mut self) -> &mut P {
        self.adapter.player_mut()
    }

    /// Callback handle registered with [`PlaybackEngine::with_event_sender`]
    pub fn event_sender(&self) -> Option<&PlayerEventSender> {
        self.events.as_ref()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Navigation =====

    /// Start the segment at `index`
    ///
    /// Any running fade, boundary watch or settle delay is cancelled. If the
    /// player is audible it is faded out first and the load happens when the
    /// fade completes.
    pub fn play_at<S: SegmentSource + ?Sized>(
        &mut self,
        playlist: &S,
        index: usize,
        now: Instant,
    ) -> Result<()> {
        let len = playlist.len();
        if index >= len {
            return Err(PlaybackError::IndexOutOfBounds { index, len });
        }

        self.cancel_timers();
        self.fade.cancel();
        self.session.pending_seek = None;
        self.session.pending_end_boundary = None;
        self.set_current(Some(index));

        let state = self.adapter.state();
        if state.is_audible() && !self.config.switch_fade().is_zero() {
            debug!(index, ?state, "Fading out before switching");
            let from = self.adapter.volume();
            self.fade.fade_to(from, 0, self.config.switch_fade(), now);
            self.set_phase(EnginePhase::Switching);
            return Ok(());
        }

        self.begin_load(playlist, now)
    }

    /// Move to the next or previous segment
    ///
    /// Returns the chosen index, or `None` when the playlist is empty.
    pub fn advance<S: SegmentSource + ?Sized>(
        &mut self,
        playlist: &S,
        direction: Direction,
        now: Instant,
    ) -> Result<Option<usize>> {
        let chosen = next_index(
            self.session.current_index,
            playlist.len(),
            direction,
            self.session.shuffle_enabled,
            &mut self.rng,
        );

        match chosen {
            Some(index) => {
                self.play_at(playlist, index, now)?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    pub fn next<S: SegmentSource + ?Sized>(
        &mut self,
        playlist: &S,
        now: Instant,
    ) -> Result<Option<usize>> {
        self.advance(playlist, Direction::Next, now)
    }

    pub fn previous<S: SegmentSource + ?Sized>(
        &mut self,
        playlist: &S,
        now: Instant,
    ) -> Result<Option<usize>> {
        self.advance(playlist, Direction::Previous, now)
    }

    // ===== Transport =====

    /// Pause when playing, resume otherwise; start at 0 when nothing is selected
    pub fn toggle_play_pause<S: SegmentSource + ?Sized>(
        &mut self,
        playlist: &S,
        now: Instant,
    ) -> Result<()> {
        if self.session.current_index.is_none() {
            return self.play_at(playlist, 0, now);
        }

        if self.adapter.state() == PlayerState::Playing {
            self.pause();
        } else {
            self.resume();
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        self.adapter.pause();
    }

    pub fn resume(&mut self) {
        self.adapter.play();
    }

    /// Stop immediately and clear the selection
    pub fn stop(&mut self) {
        self.cancel_timers();
        if self.fade.cancel() {
            self.adapter.set_volume(self.volume.percent());
        }
        self.adapter.stop();
        self.clear_session();
        info!("Playback stopped");
    }

    /// Fade out, then pause and clear the selection
    pub fn fade_out_and_stop(&mut self, now: Instant) {
        if self.session.current_index.is_none() || !self.adapter.state().is_audible() {
            self.stop();
            return;
        }

        self.cancel_timers();
        let from = self.adapter.volume();
        self.fade.fade_to(from, 0, self.config.stop_fade(), now);
        self.set_phase(EnginePhase::Stopping);
    }

    // ===== Settings =====

    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.session.shuffle_enabled != enabled {
            self.session.shuffle_enabled = enabled;
            debug!(enabled, "Shuffle changed");
            self.emit(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.session.shuffle_enabled);
    }

    /// Set volume (0-100)
    ///
    /// Applied to the player right away unless a fade-out or load is in
    /// progress; those pick the new level up at the next fade-in.
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Playlist edits =====

    /// Keep the current index pointing at the same segment after an edit
    ///
    /// Removing the current segment (or replacing the playlist) cancels
    /// pending work and clears the selection; the player keeps whatever it
    /// is doing.
    pub fn on_playlist_change(&mut self, change: PlaylistChange) {
        let Some(current) = self.session.current_index else {
            return;
        };

        match change {
            PlaylistChange::Removed(index) if index == current => {
                debug!(index, "Current segment removed");
                self.detach();
            }
            PlaylistChange::Removed(index) if index < current => {
                self.set_current(Some(current - 1));
            }
            PlaylistChange::Inserted(index) if index <= current => {
                self.set_current(Some(current + 1));
            }
            PlaylistChange::Moved { from, to } => {
                self.set_current(Some(follow_move(current, from, to)));
            }
            PlaylistChange::Replaced => {
                debug!("Playlist replaced");
                self.detach();
            }
            _ => {}
        }
    }

    // ===== Player events and ticking =====

    /// React to a state change reported by the player
    pub fn handle_player_state(&mut self, state: PlayerState, now: Instant) {
        self.emit(PlaybackEvent::PlayerStateChanged { state });

        match (state, self.session.phase) {
            (PlayerState::Playing, EnginePhase::Loading) => self.on_started(now),
            (PlayerState::Ended, EnginePhase::Playing) => {
                self.finish_segment(EndReason::NaturalEnd, now);
            }
            _ => {}
        }
    }

    /// Advance all timed behavior to `now`
    ///
    /// Order: drain player events, step the fade, fire the settle delay,
    /// check the boundary, check the readiness timeout.
    pub fn tick<S: SegmentSource + ?Sized>(&mut self, playlist: &S, now: Instant) {
        while let Some(state) = self.adapter.poll_event() {
            self.handle_player_state(state, now);
        }

        if let Some(step) = self.fade.tick(now) {
            self.adapter.set_volume(step.volume);
            if step.finished {
                self.on_fade_finished(playlist, now);
            }
        }

        if self.settle.poll(now) && self.session.phase == EnginePhase::Settling {
            self.on_settled(playlist, now);
        }

        if self.session.phase == EnginePhase::Playing
            && self.end_watch.is_armed()
            && self.end_watch.check(self.adapter.current_time())
        {
            self.finish_segment(EndReason::Boundary, now);
        }

        if self.ready_timeout.poll(now) && self.session.phase == EnginePhase::Loading {
            let index = self.session.current_index.unwrap_or_default();
            warn!(index, "Player did not start playback, giving up");
            self.emit(PlaybackEvent::PlayerUnavailable { index });
            self.clear_session();
        }
    }

    // ===== Internals =====

    fn begin_load<S: SegmentSource + ?Sized>(&mut self, playlist: &S, now: Instant) -> Result<()> {
        let Some(index) = self.session.current_index else {
            self.set_phase(EnginePhase::Idle);
            return Ok(());
        };
        let segment = playlist
            .segment(index)
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: playlist.len(),
            })?;

        self.session.pending_seek = Some(f64::from(segment.start_sec));
        self.session.pending_end_boundary = segment.end_boundary().map(f64::from);

        info!(
            index,
            video_id = %segment.video_id,
            title = %segment.title,
            start = segment.start_sec,
            end = segment.end_sec,
            "Starting segment"
        );

        self.adapter.set_volume(0);
        self.adapter.load(segment.video_id.as_str(), 0.0);
        self.adapter.play();

        if let Some(timeout) = self.config.ready_timeout() {
            self.ready_timeout.start(now, timeout);
        }

        self.set_phase(EnginePhase::Loading);
        self.emit(PlaybackEvent::SegmentStarted {
            index,
            video_id: segment.video_id.to_string(),
        });
        Ok(())
    }

    fn on_started(&mut self, now: Instant) {
        self.ready_timeout.cancel();

        if let Some(seek) = self.session.pending_seek.take() {
            self.adapter.seek(seek);
        }
        if let Some(boundary) = self.session.pending_end_boundary.take() {
            self.end_watch.arm(boundary);
        }

        self.fade
            .fade_to(0, self.volume.percent(), self.config.fade_in(), now);
        self.set_phase(EnginePhase::Playing);
    }

    fn finish_segment(&mut self, reason: EndReason, now: Instant) {
        self.end_watch.cancel();
        let Some(index) = self.session.current_index else {
            return;
        };

        info!(index, ?reason, "Segment finished");
        self.emit(PlaybackEvent::SegmentFinished { index, reason });

        let from = self.adapter.volume();
        self.fade.fade_to(from, 0, self.config.end_fade(), now);
        self.set_phase(EnginePhase::Finishing);
    }

    fn on_fade_finished<S: SegmentSource + ?Sized>(&mut self, playlist: &S, now: Instant) {
        match self.session.phase {
            EnginePhase::Switching => {
                if let Err(e) = self.begin_load(playlist, now) {
                    warn!(error = %e, "Switch target vanished");
                    self.clear_session();
                }
            }
            EnginePhase::Finishing => {
                self.adapter.pause();
                self.settle.start(now, self.config.settle_delay());
                self.set_phase(EnginePhase::Settling);
            }
            EnginePhase::Stopping => {
                self.adapter.pause();
                self.adapter.set_volume(self.volume.percent());
                self.clear_session();
                info!("Playback stopped after fade");
            }
            _ => {}
        }
    }

    fn on_settled<S: SegmentSource + ?Sized>(&mut self, playlist: &S, now: Instant) {
        match self.advance(playlist, Direction::Next, now) {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("Playlist empty, nothing to advance to");
                self.clear_session();
            }
            Err(e) => {
                warn!(error = %e, "Auto-advance failed");
                self.clear_session();
            }
        }
    }

    fn apply_volume(&mut self) {
        let level = self.volume.level();
        let is_muted = self.volume.is_muted();

        match self.session.phase {
            EnginePhase::Idle | EnginePhase::Playing | EnginePhase::Settling => {
                // A fade-in would overwrite the new level
                if self.session.phase == EnginePhase::Playing {
                    self.fade.cancel();
                }
                self.adapter.set_volume(self.volume.percent());
            }
            _ => {}
        }

        self.emit(PlaybackEvent::VolumeChanged { level, is_muted });
    }

    /// Cancel the boundary watch and both deadlines
    fn cancel_timers(&mut self) {
        self.end_watch.cancel();
        self.settle.cancel();
        self.ready_timeout.cancel();
    }

    /// Forget the current segment without touching the player's transport
    fn detach(&mut self) {
        self.cancel_timers();
        if self.fade.cancel() {
            self.adapter.set_volume(self.volume.percent());
        }
        self.clear_session();
    }

    fn clear_session(&mut self) {
        self.session.pending_seek = None;
        self.session.pending_end_boundary = None;
        self.set_current(None);
        self.set_phase(EnginePhase::Idle);
    }

    fn set_current(&mut self, index: Option<usize>) {
        if self.session.current_index != index {
            self.session.current_index = index;
            self.emit(PlaybackEvent::CurrentIndexChanged { index });
        }
    }

    fn set_phase(&mut self, phase: EnginePhase) {
        if self.session.phase != phase {
            debug!(from = ?self.session.phase, to = ?phase, "Phase change");
            self.session.phase = phase;
            self.emit(PlaybackEvent::PhaseChanged { phase });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

/// Where an index ends up after the segment at `from` moves to `to`
pub(crate) fn follow_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_move_tracks_segment() {
        // [a b c d], current = c (2)
        assert_eq!(follow_move(2, 2, 0), 0);
        assert_eq!(follow_move(2, 0, 3), 1);
        assert_eq!(follow_move(2, 3, 0), 3);
        assert_eq!(follow_move(2, 0, 1), 2);
        assert_eq!(follow_move(2, 3, 3), 2);
        assert_eq!(follow_move(2, 1, 2), 1);
        assert_eq!(follow_move(2, 2, 2), 2);
    }
}
