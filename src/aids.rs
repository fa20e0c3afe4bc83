//! Pacing aids shown while a key is held: a pulsing circle and a tone sweep.
//!
//! Both are pure functions of the round's frame counter; playing or drawing
//! them is left to the presenter.

use std::time::Duration;

use crate::FPS;

/// Base frequency of the tone sweep
pub const BASE_FREQUENCY_HZ: f32 = 440.0;
/// A tone is requested every this many ticks
pub const TONE_RETRIGGER_TICKS: u32 = 8;
pub const TONE_DURATION: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleCue {
    /// Brightness, 0 at the start of each second and 255 half way through
    pub alpha: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCue {
    pub frequency_hz: f32,
    pub duration: Duration,
}

/// Fold `value mod period` so it rises to `period / 2` and falls back to 0
fn fold(value: u32, period: u32) -> u32 {
    let phase = value % period;
    if phase <= period / 2 {
        phase
    } else {
        period - phase
    }
}

pub fn circle_cue(frame_counter: u32) -> CircleCue {
    let half = FPS / 2;
    let folded = fold(frame_counter, FPS);
    CircleCue {
        alpha: (folded * 255 / half) as u8,
    }
}

/// Tone for this tick, if one is due. The pitch climbs an octave over one
/// second and comes back down over the next.
pub fn tone_cue(frame_counter: u32) -> Option<ToneCue> {
    if frame_counter % TONE_RETRIGGER_TICKS != 0 {
        return None;
    }
    let phase = fold(frame_counter, 2 * FPS) as f32;
    Some(ToneCue {
        frequency_hz: BASE_FREQUENCY_HZ * 2f32.powf(phase / FPS as f32),
        duration: TONE_DURATION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_pulses_once_per_second() {
        assert_eq!(circle_cue(0).alpha, 0);
        assert_eq!(circle_cue(15).alpha, 127);
        assert_eq!(circle_cue(30).alpha, 255);
        assert_eq!(circle_cue(45).alpha, 127);
        assert_eq!(circle_cue(60).alpha, 0);
        assert_eq!(circle_cue(90).alpha, 255);
    }

    #[test]
    fn tone_only_every_eighth_tick() {
        assert!(tone_cue(1).is_none());
        assert!(tone_cue(7).is_none());
        assert!(tone_cue(8).is_some());
        assert!(tone_cue(16).is_some());
    }

    #[test]
    fn tone_sweeps_one_octave() {
        let low = tone_cue(0).unwrap();
        assert_eq!(low.frequency_hz, 440.0);
        assert_eq!(low.duration, TONE_DURATION);
        // 120 frames is a full period, back to the base pitch
        assert_eq!(tone_cue(120).unwrap().frequency_hz, 440.0);
        let mid = tone_cue(56).unwrap().frequency_hz;
        assert!(mid > 800.0 && mid < 880.0, "{mid}");
        let falling = tone_cue(64).unwrap().frequency_hz;
        assert!((falling - mid).abs() < 1e-3, "{falling} vs {mid}");
    }
}
