//! Headless playback session against the simulated player
//!
//! Runs the real engine on a virtual clock so a playlist's trims, fades and
//! transitions can be checked without a browser.

use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::debug;
use utawaku_core::{format_time, PlaylistStore};
use utawaku_playback::{
    player_channel, EndReason, EngineConfig, PlaybackEngine, PlaybackEvent, PlayerAdapter,
    SimulatedPlayer, DEFAULT_VIDEO_SECS,
};

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Virtual time to run for
    pub duration: Duration,

    /// Tick interval
    pub frame: Duration,

    /// Index of the first segment
    pub start_index: usize,

    pub shuffle: bool,

    /// Seed for shuffle picks
    pub seed: Option<u64>,

    /// Natural length of every simulated video in seconds
    pub video_secs: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(300),
            frame: Duration::from_millis(16),
            start_index: 0,
            shuffle: false,
            seed: None,
            video_secs: DEFAULT_VIDEO_SECS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    /// Human-readable transcript, one line per segment event
    pub lines: Vec<String>,
    pub segments_started: usize,
    pub segments_finished: usize,
}

/// Play `store` for `options.duration` of virtual time
pub fn simulate(
    store: &PlaylistStore,
    config: &EngineConfig,
    options: &SimulationOptions,
) -> Result<SimulationReport> {
    let (callbacks, events) = player_channel();
    let player = SimulatedPlayer::new(callbacks.clone()).with_default_duration(options.video_secs);
    callbacks.ready();

    let mut engine = PlaybackEngine::new(PlayerAdapter::new(player, events), config.clone())
        .with_event_sender(callbacks);
    if let Some(seed) = options.seed {
        engine = engine.with_rng_seed(seed);
    }
    engine.set_shuffle(options.shuffle);

    let frame = if options.frame.is_zero() {
        Duration::from_millis(16)
    } else {
        options.frame
    };

    let start = Instant::now();
    let mut now = start;
    let mut report = SimulationReport::default();

    engine.play_at(store, options.start_index, now)?;
    record(&mut report, store, now - start, engine.drain_events());

    while now - start < options.duration {
        now += frame;
        engine.player_mut().advance(frame);
        engine.tick(store, now);
        record(&mut report, store, now - start, engine.drain_events());
    }

    debug!(
        started = report.segments_started,
        finished = report.segments_finished,
        "Simulation complete"
    );
    Ok(report)
}

fn record(
    report: &mut SimulationReport,
    store: &PlaylistStore,
    at: Duration,
    events: Vec<PlaybackEvent>,
) {
    for event in events {
        let line = match event {
            PlaybackEvent::SegmentStarted { index, .. } => {
                report.segments_started += 1;
                let Some(segment) = store.get(index) else {
                    continue;
                };
                let end = segment
                    .end_boundary()
                    .map_or_else(|| "end".to_string(), format_time);
                format!(
                    "start  #{} {} ({}-{})",
                    index + 1,
                    segment.title,
                    format_time(segment.start_sec),
                    end
                )
            }
            PlaybackEvent::SegmentFinished { index, reason } => {
                report.segments_finished += 1;
                let why = match reason {
                    EndReason::Boundary => "trim end reached",
                    EndReason::NaturalEnd => "video ended",
                };
                format!("finish #{} ({why})", index + 1)
            }
            PlaybackEvent::PlayerUnavailable { index } => {
                format!("player did not start #{}", index + 1)
            }
            _ => continue,
        };
        report
            .lines
            .push(format!("[{:>8.2}s] {line}", at.as_secs_f64()));
    }
}
