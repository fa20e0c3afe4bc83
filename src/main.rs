mod ui;

use std::{
    io::{self, stdin, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{
        KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use holdfast::{
    app_dirs::AppDirs,
    audio::{self, ToneSink},
    config::{Config, ConfigStore, FileConfigStore},
    game::{ExitRequest, FrameInput, FrameOutput, GameState, GameStateMachine},
    input::{is_quit, KeyHold},
    logging,
    menu::SettingsMenu,
    number_pool::PoolMode,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    settings::Settings,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

/// hold a key for exactly as long as the number on screen says
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal timing game: you are shown a number (an integer, a root, a logarithm or a famous constant) and must hold a key for that many seconds. Each hold is scored on how close it came."
)]
pub struct Cli {
    /// amount of numbers to estimate per game
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=4))]
    numbers: Option<u8>,

    /// pool the target numbers are drawn from
    #[clap(short = 'p', long, value_enum)]
    pool: Option<PoolMode>,

    /// show the exact target time in seconds
    #[clap(long)]
    show_seconds: bool,

    /// show the target time in frames
    #[clap(long)]
    show_frames: bool,

    /// show a pulsing circle while the key is held
    #[clap(long)]
    circle: bool,

    /// play a rising and falling tone while the key is held
    #[clap(long)]
    audio: bool,

    /// seed for the number generator, for repeatable games
    #[clap(long)]
    seed: Option<u64>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective configuration to the config file and exit
    #[clap(long)]
    write_config: bool,

    /// where to write logs (level via HOLDFAST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// treat a key as released after this many milliseconds without its first repeat,
    /// on terminals that do not report releases
    #[clap(long)]
    release_timeout_ms: Option<u64>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command line flags layered over the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(n) = self.numbers {
            cfg.numbers_per_game = n;
        }
        if let Some(pool) = self.pool {
            cfg.number_pool = pool;
        }
        cfg.show_exact_seconds |= self.show_seconds;
        cfg.show_exact_frames |= self.show_frames;
        cfg.visual_aid_circle |= self.circle;
        cfg.play_audio_aid |= self.audio;
        if let Some(ms) = self.release_timeout_ms {
            cfg.release_timeout_ms = ms;
        }
        cfg
    }
}

pub struct App {
    pub machine: GameStateMachine,
    pub menu: SettingsMenu,
    pub hold: KeyHold,
    pub output: FrameOutput,
    last_press: Option<KeyCode>,
    initial_settings: Settings,
    seed: Option<u64>,
}

impl App {
    pub fn new(cfg: &Config, seed: Option<u64>) -> Self {
        let settings = Settings::from(cfg);
        let mut machine = GameStateMachine::new(settings.clone(), Self::rng(seed));
        let output = machine.step(FrameInput::idle());
        Self {
            machine,
            menu: SettingsMenu::default(),
            hold: KeyHold::new(Duration::from_millis(cfg.release_timeout_ms)),
            output,
            last_press: None,
            initial_settings: settings,
            seed,
        }
    }

    fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Fresh game, as if the process had been relaunched
    pub fn reset(&mut self) {
        self.machine = GameStateMachine::new(self.initial_settings.clone(), Self::rng(self.seed));
        self.menu = SettingsMenu::default();
        self.hold.reset();
        self.last_press = None;
        self.output = self.machine.step(FrameInput::idle());
    }

    fn in_settings(&self) -> bool {
        self.machine.state() == GameState::Settings
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if self.in_settings() {
            if let Some(cmd) = self.menu.on_key(&key) {
                if let Err(err) = self.machine.settings_command(cmd) {
                    tracing::warn!(%err, "settings change rejected");
                }
            }
        }
        if key.kind == KeyEventKind::Press {
            self.last_press = Some(key.code);
        }
        self.hold.on_key(&key, now);
    }

    /// Advance one frame, returning the output for the presenter
    pub fn on_tick(&mut self, now: Instant) -> &FrameOutput {
        let input = self.hold.frame_input(now);
        self.output = self.machine.step(input);
        &self.output
    }

    /// How to leave the run loop once the game asks to exit
    fn exit_type(&self, request: ExitRequest) -> ExitType {
        match request {
            ExitRequest::GameOver
                if matches!(self.last_press, Some(KeyCode::Char('r' | 'R'))) =>
            {
                ExitType::Restart
            }
            _ => ExitType::Quit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_file.clone().unwrap_or_else(AppDirs::log_path));

    let store = cli.config_store();
    let cfg = cli.apply(store.load());

    if cli.write_config {
        store.save(&cfg)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode().context("enabling raw mode")?;
    let mut enhanced = false;
    let result = run(&cfg, cli.seed, &mut enhanced);
    let restored = restore_terminal(&mut io::stdout(), enhanced);

    // the game's own error wins over a teardown failure
    result.and(restored)
}

/// Everything between raw mode on and off. Sets `enhanced` as soon as the
/// keyboard enhancement flags are pushed, so they are popped even on error.
fn run(cfg: &Config, seed: Option<u64>, enhanced: &mut bool) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    *enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    tracing::info!(enhanced = *enhanced, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let mut app = App::new(cfg, seed);
    app.hold = app.hold.clone().with_release_events(*enhanced);
    let mut sink = audio::default_sink();
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::frame_rate());
    start_tui(&mut terminal, &mut app, runner, sink.as_mut())
}

/// Undo every terminal change, attempting each step even after one fails.
/// Returns the first failure.
fn restore_terminal<W: Write>(out: &mut W, enhanced: bool) -> Result<()> {
    let popped = if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    popped.and(raw).and(screen).context("restoring the terminal")
}

#[derive(Debug, PartialEq)]
enum ExitType {
    Restart,
    Quit,
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut runner: Runner<E, T>,
    sink: &mut dyn ToneSink,
) -> Result<()> {
    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui::draw(app, f))?;

        loop {
            match runner.step() {
                GameEvent::Tick => {
                    let output = app.on_tick(Instant::now());
                    if let Some(tone) = output.tone {
                        sink.play(tone);
                    }
                    if let Some(request) = output.exit {
                        exit_type = app.exit_type(request);
                        break;
                    }
                    terminal.draw(|f| ui::draw(app, f))?;
                }
                GameEvent::Resize => {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
                GameEvent::Key(key) => {
                    if is_quit(&key, app.in_settings()) {
                        let output = app.machine.step(FrameInput::quit());
                        if output.exit.is_some() {
                            break;
                        }
                    }
                    app.on_key(key, Instant::now());
                    if app.in_settings() {
                        terminal.draw(|f| ui::draw(app, f))?;
                    }
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                tracing::info!("restarting");
                app.reset();
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}
