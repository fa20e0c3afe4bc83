use rand::rngs::StdRng;
use rand::Rng;

use crate::aids::{circle_cue, tone_cue, CircleCue, ToneCue};
use crate::number_pool::{generate, Draw, Round};
use crate::scoring::{max_total, score, MAX_SCORE};
use crate::settings::{SettingKey, Settings, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Intro,
    Settings,
    NumberShow,
    NumberEstimate,
    NumberResult,
    GameEnd,
    /// Dead end entered when the machine finds itself in a state it cannot
    /// interpret. Renders a diagnostic and never transitions again.
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
    Steady,
}

/// Compares the key level of this frame with the previous one
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub fn update(&mut self, level: bool) -> Edge {
        let edge = match (self.previous, level) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Steady,
        };
        self.previous = level;
        edge
    }

    /// Treat `level` as already seen, so a key held across a state change
    /// has to be released and pressed again to count.
    pub fn rebase(&mut self, level: bool) {
        self.previous = level;
    }
}

/// Per-frame input snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// An actionable key is currently held
    pub action_active: bool,
    pub quit: bool,
    /// Frames between the actual release and this frame, when the release
    /// could only be detected late
    pub release_lag: u32,
}

impl FrameInput {
    pub fn held() -> Self {
        Self {
            action_active: true,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    /// Quit signal seen this frame
    Quit,
    /// The final result was acknowledged
    GameOver,
}

/// Everything the presenter needs for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub lines: Vec<String>,
    pub circle: Option<CircleCue>,
    pub tone: Option<ToneCue>,
    pub exit: Option<ExitRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Adjust { key: SettingKey, delta: i8 },
    Start,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundContext {
    pub round: Round,
    /// Frames the key has been held this round, counting the press frame
    pub frame_counter: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    pub number_shown: u8,
    pub numbers_to_show: u8,
    pub individual_score: i64,
    pub total_score: i64,
    /// Famous constants already shown this game
    pub used_constants: Vec<usize>,
}

impl GameSession {
    fn new(numbers_to_show: u8) -> Self {
        Self {
            numbers_to_show,
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.number_shown >= self.numbers_to_show
    }
}

#[derive(Debug)]
pub struct GameStateMachine<R: Rng = StdRng> {
    state: GameState,
    settings: Settings,
    session: GameSession,
    round: Option<RoundContext>,
    edge: EdgeDetector,
    rng: R,
}

impl<R: Rng> GameStateMachine<R> {
    pub fn new(settings: Settings, rng: R) -> Self {
        Self {
            state: GameState::Intro,
            settings,
            session: GameSession::default(),
            round: None,
            edge: EdgeDetector::default(),
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn round(&self) -> Option<&RoundContext> {
        self.round.as_ref()
    }

    /// Advance one frame
    pub fn step(&mut self, input: FrameInput) -> FrameOutput {
        if input.quit {
            return FrameOutput {
                exit: Some(ExitRequest::Quit),
                ..FrameOutput::default()
            };
        }

        let level = input.action_active;
        let edge = self.edge.update(level);
        let mut exit = None;

        match self.state {
            GameState::Intro => {
                if edge == Edge::Rising {
                    self.enter(GameState::Settings, level);
                }
            }
            GameState::Settings | GameState::Faulted => {}
            GameState::NumberShow => match self.round.as_mut() {
                None => self.fault("no round to show"),
                Some(ctx) => {
                    if edge == Edge::Rising {
                        ctx.frame_counter = 1;
                        self.enter(GameState::NumberEstimate, level);
                    }
                }
            },
            GameState::NumberEstimate => match self.round.as_mut() {
                None => self.fault("no round to estimate"),
                Some(ctx) => {
                    if level {
                        ctx.frame_counter += 1;
                    } else {
                        // frames ticked after the real release do not count
                        let held = ctx.frame_counter.saturating_sub(input.release_lag).max(1);
                        ctx.frame_counter = held;
                        let target = ctx.round.target_frames;
                        let points = score(held, target, MAX_SCORE);
                        self.session.individual_score = points;
                        self.session.total_score += points;
                        tracing::info!(held, target, points, "round scored");
                        self.enter(GameState::NumberResult, level);
                    }
                }
            },
            GameState::NumberResult => {
                if self.round.is_none() {
                    self.fault("no round result");
                } else if edge == Edge::Rising {
                    if self.session.is_complete() {
                        self.enter(GameState::GameEnd, level);
                    } else {
                        self.start_round(level);
                    }
                }
            }
            GameState::GameEnd => {
                if edge == Edge::Rising {
                    exit = Some(ExitRequest::GameOver);
                }
            }
        }

        let mut output = self.present();
        output.exit = exit;
        output
    }

    /// Change settings or start the game. Ignored outside the settings screen.
    pub fn settings_command(&mut self, cmd: SettingsCommand) -> Result<(), SettingsError> {
        if self.state != GameState::Settings {
            return Ok(());
        }
        match cmd {
            SettingsCommand::Adjust { key, delta } => self.settings.adjust(key, delta),
            SettingsCommand::Start => {
                self.session = GameSession::new(self.settings.snapshot());
                // Start is chosen with a key press that is still down
                self.start_round(true);
                Ok(())
            }
        }
    }

    fn start_round(&mut self, level: bool) {
        self.session.individual_score = 0;
        let round = generate(
            self.settings.number_pool,
            &self.session.used_constants,
            &mut self.rng,
        );
        self.begin_round(round, level);
    }

    fn begin_round(&mut self, round: Round, level: bool) {
        if let Draw::Constant(idx) = round.draw {
            self.session.used_constants.push(idx);
        }
        self.session.number_shown += 1;
        tracing::info!(
            pool = %self.settings.number_pool,
            text = %round.display_text,
            target_frames = round.target_frames,
            round = self.session.number_shown,
            of = self.session.numbers_to_show,
            "round generated"
        );
        self.round = Some(RoundContext {
            round,
            frame_counter: 1,
        });
        self.enter(GameState::NumberShow, level);
    }

    fn enter(&mut self, next: GameState, level: bool) {
        tracing::debug!(from = %self.state, to = %next, "state change");
        self.state = next;
        self.edge.rebase(level);
    }

    fn fault(&mut self, reason: &str) {
        tracing::error!(state = %self.state, reason, "unknown game state");
        self.state = GameState::Faulted;
    }

    fn present(&self) -> FrameOutput {
        let mut out = FrameOutput::default();
        let lines = &mut out.lines;
        match (self.state, self.round.as_ref()) {
            (GameState::Intro, _) => {
                lines.push("You will be playing a customisable timing game".into());
                lines.push(
                    "Your goal is to hold down any key for as long as a given number".into(),
                );
                lines.push("Press any key to start customisation".into());
            }
            (GameState::Settings, _) => {
                lines.push("Customisation".into());
            }
            (GameState::NumberShow, Some(ctx)) => {
                lines.push(format!(
                    "You need to hold a key for {} seconds",
                    ctx.round.display_text
                ));
                if self.settings.show_exact_seconds {
                    lines.push(format!("(Exactly: {} seconds)", ctx.round.number_value));
                }
                if self.settings.show_exact_frames {
                    lines.push(format!("({} frames)", ctx.round.target_frames));
                }
                lines.push("The timer starts as soon as you press a key".into());
            }
            (GameState::NumberEstimate, Some(ctx)) => {
                lines.push("Let go when you think the right time has passed".into());
                if self.settings.visual_aid_circle {
                    out.circle = Some(circle_cue(ctx.frame_counter));
                }
                if self.settings.play_audio_aid {
                    out.tone = tone_cue(ctx.frame_counter);
                }
            }
            (GameState::NumberResult, Some(ctx)) => {
                lines.push(format!(
                    "You scored {} out of a possible {}",
                    self.session.individual_score, MAX_SCORE
                ));
                if self.settings.show_exact_frames {
                    lines.push(format!(
                        "You held for {} frames; the target was {} frames",
                        ctx.frame_counter, ctx.round.target_frames
                    ));
                }
                lines.push("Press any key to continue".into());
            }
            (GameState::GameEnd, _) => {
                lines.push(format!(
                    "You achieved a total score of {} out of a possible {}",
                    self.session.total_score,
                    max_total(self.session.numbers_to_show)
                ));
                lines.push("Press r to play again, any other key to exit".into());
            }
            (GameState::Faulted, _)
            | (GameState::NumberShow, None)
            | (GameState::NumberEstimate, None)
            | (GameState::NumberResult, None) => {
                lines.push("ERROR: Unknown game state".into());
                lines.push("Please report this to the developer".into());
                lines.push("Press Esc to close the game".into());
            }
        }
        out
    }
}
