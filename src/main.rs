use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};

use snake_arcade::audio::TerminalBell;
use snake_arcade::config::{self, DEFAULT_GRID_SIZE};
use snake_arcade::input::{self, GameInput};
use snake_arcade::renderer::{self, HudInfo};
use snake_arcade::score::JsonScoreStore;
use snake_arcade::session::{GameSession, SessionStatus};
use snake_arcade::terminal_runtime::{self, TerminalSession};
use snake_arcade::theme::{self, Theme};

/// Grid-based snake arcade game for the terminal.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Cells per board side (12, 16, 20, or 26).
    #[arg(long = "grid-size", default_value_t = DEFAULT_GRID_SIZE, value_parser = config::parse_grid_size)]
    grid_size: u16,

    /// Color palette: neon, classic, or retro.
    #[arg(long, default_value = "neon", value_parser = theme::parse_theme)]
    theme: &'static Theme,

    /// Start with sound muted.
    #[arg(long)]
    muted: bool,
}

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    terminal_runtime::install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &cli)
}

fn run(terminal: &mut TerminalSession, cli: &Cli) -> io::Result<()> {
    let mut session = GameSession::new(
        cli.grid_size,
        JsonScoreStore::new(),
        TerminalBell::new(cli.muted),
    );

    loop {
        session.poll(Instant::now());

        let hud = HudInfo {
            high_score: session.high_score(),
            speed_label: session.speed_label(),
            min_interval_ms: session.min_interval_seen().as_millis() as u64,
            plays: session.plays(),
            muted: session.audio().is_muted(),
            theme: cli.theme,
        };
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session.snapshot(), &hud))?;

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                let Some(game_input) = input::translate_key(key) else {
                    continue;
                };
                if handle_input(&mut session, game_input) {
                    return Ok(());
                }
            }
            // Losing terminal focus pauses a running game.
            Event::FocusLost => session.pause(),
            _ => {}
        }
    }
}

/// Applies one control event. Returns true when the player quit.
fn handle_input(
    session: &mut GameSession<JsonScoreStore, TerminalBell>,
    game_input: GameInput,
) -> bool {
    match game_input {
        GameInput::Quit => {
            // Settle the high score before tearing the terminal down.
            session.end();
            return true;
        }
        GameInput::Direction(direction) => session.buffer_direction(direction),
        GameInput::Start => session.start(Instant::now()),
        GameInput::Restart => session.restart(Instant::now()),
        GameInput::PauseToggle => match session.status() {
            SessionStatus::Running => session.pause(),
            SessionStatus::Paused => session.resume(Instant::now()),
            _ => {}
        },
        GameInput::ToggleMute => {
            session.audio_mut().toggle_muted();
        }
    }

    false
}
