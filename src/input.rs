//! Tracks whether an actionable key is currently held.
//!
//! Terminals with the kitty keyboard protocol report releases directly. Older
//! terminals only send presses and auto-repeats, so there a key counts as
//! released once no press or repeat has arrived for a while. The wait before
//! the first repeat is longer than the one between repeats, and a release
//! found this way is dated back to the last press or repeat.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::FrameInput;
use crate::FPS;

/// Wait for the first auto-repeat; above the usual 500-660 ms OS delay
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(800);
/// Wait between auto-repeats once they have started
pub const REPEAT_TIMEOUT: Duration = Duration::from_millis(150);

/// Ctrl+C anywhere, Esc everywhere except the settings screen
pub fn is_quit(key: &KeyEvent, in_settings: bool) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Esc => !in_settings,
        _ => false,
    }
}

/// Whole game frames that fit in `elapsed`
pub fn whole_frames(elapsed: Duration) -> u32 {
    (elapsed.as_secs_f64() * f64::from(FPS)) as u32
}

#[derive(Debug, Clone)]
pub struct KeyHold {
    held: Option<KeyCode>,
    last_seen: Instant,
    release_timeout: Duration,
    /// The held key has auto-repeated at least once
    repeating: bool,
    /// Release events have been seen, so the timeout is no longer needed
    reports_release: bool,
}

impl Default for KeyHold {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_TIMEOUT)
    }
}

impl KeyHold {
    pub fn new(release_timeout: Duration) -> Self {
        Self {
            held: None,
            last_seen: Instant::now(),
            release_timeout,
            repeating: false,
            reports_release: false,
        }
    }

    /// Start out trusting release events, e.g. after enabling keyboard enhancement
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.reports_release = enabled;
        self
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    /// The key currently considered held
    pub fn held_key(&self) -> Option<KeyCode> {
        self.held
    }

    pub fn on_key(&mut self, key: &KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // without enhancement, repeats arrive as presses of the held key
                self.repeating = key.kind == KeyEventKind::Repeat || self.held == Some(key.code);
                self.held = Some(key.code);
                self.last_seen = now;
            }
            KeyEventKind::Release => {
                if !self.reports_release {
                    tracing::debug!("terminal reports key releases");
                    self.reports_release = true;
                }
                if self.held == Some(key.code) {
                    self.held = None;
                    self.repeating = false;
                }
            }
        }
    }

    fn timeout(&self) -> Duration {
        if self.repeating {
            REPEAT_TIMEOUT.min(self.release_timeout)
        } else {
            self.release_timeout
        }
    }

    /// Expire a hold that is no longer being repeated. Returns how long ago
    /// the key was last seen when the hold expires on this tick.
    pub fn on_tick(&mut self, now: Instant) -> Option<Duration> {
        if self.reports_release || self.held.is_none() {
            return None;
        }
        let waited = now.saturating_duration_since(self.last_seen);
        if waited <= self.timeout() {
            return None;
        }
        self.held = None;
        self.repeating = false;
        Some(waited)
    }

    /// Input for the frame ticking at `now`
    pub fn frame_input(&mut self, now: Instant) -> FrameInput {
        let release_lag = self.on_tick(now).map(whole_frames).unwrap_or(0);
        FrameInput {
            action_active: self.is_held(),
            quit: false,
            release_lag,
        }
    }

    /// Forget any hold, e.g. on restart
    pub fn reset(&mut self) {
        self.held = None;
        self.repeating = false;
    }
}
