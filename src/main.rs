mod host;
mod ui;

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_jockey::build_info;
use dino_jockey::core::{
    ConfigError, GameConfig, Viewport, FRAME_INTERVAL_MS, LANE_HEIGHT, LANE_WIDTH,
};
use dino_jockey::runner::Match;
use host::args::{self, Command, RunOptions};
use host::audio::TerminalBell;
use host::keyboard::{KeyAction, KeyBindings, Keyboard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let options = match args::parse(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'dino-jockey --help' for usage.");
            std::process::exit(1);
        }
    };

    let log_path = host::logging::init()?;
    log::info!(
        "{} starting, logging to {}",
        build_info::version_line(),
        log_path.display()
    );

    let config = load_config(&options)?;
    let lanes = Viewport::split_lanes(LANE_WIDTH, LANE_HEIGHT * 2.0, 0.0);
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Match::new(lanes, config, rng).map_err(invalid_data)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    log::info!("terminal reports key releases: {}", reports_release);
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let keyboard = Keyboard::new(KeyBindings::default(), reports_release);
    let result = run(
        &mut terminal,
        &mut game,
        keyboard,
        TerminalBell::new(options.mute),
    );

    // Cleanup terminal
    if reports_release {
        terminal
            .backend_mut()
            .execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        log::error!("exiting on error: {}", e);
    }
    result
}

/// Frame loop: draw, drain input until the next frame is due, then tick.
fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut Match<StdRng>,
    mut keyboard: Keyboard,
    mut bell: TerminalBell,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            ui::render_match(frame, area, game);
        })?;
        bell.flush(&mut io::stdout())?;

        let deadline = last_tick + frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if keyboard.handle(key, Instant::now()) == KeyAction::Quit {
                        log::info!("quit");
                        return Ok(());
                    }
                }
                Event::FocusLost => keyboard.clear(),
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;

        let inputs = keyboard.poll(now);
        let update = game.update(dt, &inputs);
        update.dispatch_sounds(&mut bell);
    }
}

fn load_config(options: &RunOptions) -> io::Result<GameConfig> {
    let Some(path) = &options.config else {
        return Ok(GameConfig::default());
    };
    let config = GameConfig::load(path).map_err(invalid_data)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn invalid_data(err: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
