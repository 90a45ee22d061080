//! Volume fades
//!
//! One fade at a time. A fade runs from a start volume to a target over a
//! duration using an ease-out cubic curve and is advanced by
//! [`FadeController::tick`] with the caller's clock.

use std::time::{Duration, Instant};

/// Ease-out cubic: fast start, gentle landing
///
/// `p` is clamped to `[0, 1]`.
pub fn ease_out_cubic(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Volume at `elapsed` into a fade from `from` to `to`
pub fn fade_volume(from: u8, to: u8, elapsed: Duration, duration: Duration) -> u8 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f64() / duration.as_secs_f64()
    };
    let from = f64::from(from);
    let to = f64::from(to);
    let value = from + (to - from) * ease_out_cubic(progress);
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    from: u8,
    to: u8,
    started: Instant,
    duration: Duration,
}

/// Result of advancing the active fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStep {
    /// Volume to apply now
    pub volume: u8,

    /// The fade reached its target and is no longer active
    pub finished: bool,
}

/// Single-slot fade runner
#[derive(Debug, Default)]
pub struct FadeController {
    active: Option<Fade>,
}

impl FadeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fade, replacing any fade in progress
    pub fn fade_to(&mut self, from: u8, to: u8, duration: Duration, now: Instant) {
        self.active = Some(Fade {
            from: from.min(100),
            to: to.min(100),
            started: now,
            duration,
        });
    }

    /// Drop the active fade without reaching its target
    ///
    /// Returns whether a fade was running. Safe to call repeatedly.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the active fade
    pub fn target(&self) -> Option<u8> {
        self.active.map(|fade| fade.to)
    }

    /// Advance the active fade to `now`
    ///
    /// Returns `None` when no fade is running. The step that reaches the
    /// target reports `finished` and clears the slot.
    pub fn tick(&mut self, now: Instant) -> Option<FadeStep> {
        let fade = self.active?;
        let elapsed = now.saturating_duration_since(fade.started);

        if elapsed >= fade.duration {
            self.active = None;
            return Some(FadeStep {
                volume: fade.to,
                finished: true,
            });
        }

        Some(FadeStep {
            volume: fade_volume(fade.from, fade.to, elapsed, fade.duration),
            finished: false,
        })
    }
}
