use thiserror::Error;

use crate::config::Config;
use crate::number_pool::PoolMode;

pub const MIN_NUMBERS_PER_GAME: u8 = 1;
pub const MAX_NUMBERS_PER_GAME: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SettingKey {
    #[strum(serialize = "Show Exact Time in Seconds")]
    ShowExactSeconds,
    #[strum(serialize = "Show Exact Time in Frames")]
    ShowExactFrames,
    #[strum(serialize = "Visual Aid (Pulsing Circle)")]
    VisualAidCircle,
    #[strum(serialize = "Audio Aid (Tone Sweep)")]
    PlayAudioAid,
    #[strum(serialize = "Amount of Numbers to Estimate")]
    NumbersPerGame,
    #[strum(serialize = "Number Pool")]
    NumberPoolChoice,
}

impl SettingKey {
    /// Menu order
    pub const ALL: [SettingKey; 6] = [
        SettingKey::ShowExactSeconds,
        SettingKey::ShowExactFrames,
        SettingKey::VisualAidCircle,
        SettingKey::PlayAudioAid,
        SettingKey::NumberPoolChoice,
        SettingKey::NumbersPerGame,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Count(u8),
    Pool(PoolMode),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Flag(true) => write!(f, "ON"),
            SettingValue::Flag(false) => write!(f, "OFF"),
            SettingValue::Count(n) => write!(f, "{n}"),
            SettingValue::Pool(mode) => write!(f, "{mode}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("setting {key} does not accept {value:?}")]
    WrongKind { key: SettingKey, value: SettingValue },
    #[error("numbers per game must be between 1 and 4, got {0}")]
    OutOfRange(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub show_exact_seconds: bool,
    pub show_exact_frames: bool,
    pub visual_aid_circle: bool,
    pub play_audio_aid: bool,
    pub numbers_per_game: u8,
    pub number_pool: PoolMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_exact_seconds: false,
            show_exact_frames: false,
            visual_aid_circle: false,
            play_audio_aid: false,
            numbers_per_game: 3,
            number_pool: PoolMode::Integers,
        }
    }
}

impl From<&Config> for Settings {
    fn from(cfg: &Config) -> Self {
        Self {
            show_exact_seconds: cfg.show_exact_seconds,
            show_exact_frames: cfg.show_exact_frames,
            visual_aid_circle: cfg.visual_aid_circle,
            play_audio_aid: cfg.play_audio_aid,
            numbers_per_game: cfg
                .numbers_per_game
                .clamp(MIN_NUMBERS_PER_GAME, MAX_NUMBERS_PER_GAME),
            number_pool: cfg.number_pool,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::ShowExactSeconds => SettingValue::Flag(self.show_exact_seconds),
            SettingKey::ShowExactFrames => SettingValue::Flag(self.show_exact_frames),
            SettingKey::VisualAidCircle => SettingValue::Flag(self.visual_aid_circle),
            SettingKey::PlayAudioAid => SettingValue::Flag(self.play_audio_aid),
            SettingKey::NumbersPerGame => SettingValue::Count(self.numbers_per_game),
            SettingKey::NumberPoolChoice => SettingValue::Pool(self.number_pool),
        }
    }

    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        match (key, value) {
            (SettingKey::ShowExactSeconds, SettingValue::Flag(on)) => self.show_exact_seconds = on,
            (SettingKey::ShowExactFrames, SettingValue::Flag(on)) => self.show_exact_frames = on,
            (SettingKey::VisualAidCircle, SettingValue::Flag(on)) => self.visual_aid_circle = on,
            (SettingKey::PlayAudioAid, SettingValue::Flag(on)) => self.play_audio_aid = on,
            (SettingKey::NumbersPerGame, SettingValue::Count(n)) => {
                if !(MIN_NUMBERS_PER_GAME..=MAX_NUMBERS_PER_GAME).contains(&n) {
                    return Err(SettingsError::OutOfRange(n));
                }
                self.numbers_per_game = n;
            }
            (SettingKey::NumberPoolChoice, SettingValue::Pool(mode)) => self.number_pool = mode,
            (key, value) => return Err(SettingsError::WrongKind { key, value }),
        }
        tracing::debug!(%key, %value, "setting changed");
        Ok(())
    }

    /// Step a setting one notch: flags toggle, the pool cycles, the count moves
    /// by `delta` and stays in range.
    pub fn adjust(&mut self, key: SettingKey, delta: i8) -> Result<(), SettingsError> {
        let next = match self.get(key) {
            SettingValue::Flag(on) => SettingValue::Flag(!on),
            SettingValue::Pool(mode) if delta < 0 => SettingValue::Pool(mode.prev()),
            SettingValue::Pool(mode) => SettingValue::Pool(mode.next()),
            SettingValue::Count(n) => SettingValue::Count(
                (n as i16 + delta as i16)
                    .clamp(MIN_NUMBERS_PER_GAME as i16, MAX_NUMBERS_PER_GAME as i16)
                    as u8,
            ),
        };
        self.set(key, next)
    }

    /// Numbers to show for the game that is about to start
    pub fn snapshot(&self) -> u8 {
        self.numbers_per_game
    }
}
