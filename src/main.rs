use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use webtrek::cli;
use webtrek::game_state::{GameSession, Key, Mode};
use webtrek::io::Dialog;
use webtrek::ui::terminal::{render, TerminalShell};

const TICK: Duration = Duration::from_millis(10);

fn main() -> std::io::Result<()> {
    let args = cli::args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // The terminal is owned by the game; logs go to a file.
    if let Ok(file) = File::create("webtrek.log") {
        let _ = WriteLogger::init(level, Config::default(), file);
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    let result = run(&mut out, seed);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, seed: u64) -> std::io::Result<()> {
    let mut shell = TerminalShell::new();
    let mut session = GameSession::new(seed);
    session.start(&mut shell);

    let origin = Instant::now();
    loop {
        let frame_start = Instant::now();
        let now = origin.elapsed().as_millis() as u64;

        // Drain pending input before the tick runs.
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(key, &mut session, &mut shell, now) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(mouse, &mut session, &mut shell),
                _ => {}
            }
        }

        session.on_frame_update(now, &mut shell);

        // The modal clears once the mode machine has moved on.
        if shell.active_dialog.is_some() && !is_modal_mode(session.mode()) {
            shell.active_dialog = None;
            shell.dirty = true;
        }

        if shell.dirty {
            render(out, &shell, &session)?;
            shell.dirty = false;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < TICK {
            std::thread::sleep(TICK - elapsed);
        }
    }
}

fn is_modal_mode(mode: Mode) -> bool {
    matches!(mode, Mode::MainMenu | Mode::EscapeMenu | Mode::LoadGame)
}

/// Returns true when the program should exit.
fn handle_key(
    key: KeyEvent,
    session: &mut GameSession,
    shell: &mut TerminalShell,
    now: u64,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    // Keys go to the active modal first.
    if let Some(dialog) = shell.active_dialog {
        match (dialog, key.code) {
            (Dialog::MainMenu, KeyCode::Char('n')) => {
                shell.active_dialog = None;
                session.request_new_game(shell);
            }
            (Dialog::MainMenu, KeyCode::Char('l')) => {
                shell.active_dialog = None;
                session.request_load_game(shell);
            }
            (Dialog::MainMenu, KeyCode::Char('q')) => return true,
            (Dialog::EscapeMenu, KeyCode::Char('r')) => {
                shell.active_dialog = None;
                session.set_state(Mode::ShortRange, shell);
            }
            (Dialog::EscapeMenu, KeyCode::Char('s')) => {
                shell.active_dialog = None;
                session.request_save_game(shell);
            }
            (Dialog::EscapeMenu, KeyCode::Char('b')) => {
                shell.active_dialog = None;
                session.request_main_menu(shell);
            }
            (Dialog::LoadGame, KeyCode::Enter) => {
                shell.active_dialog = None;
                session.confirm_load_selection(shell);
            }
            (Dialog::LoadGame, KeyCode::Esc) => {
                shell.active_dialog = None;
                session.cancel_load_game(shell);
            }
            _ => {}
        }
        shell.dirty = true;
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => session.on_key_down(Key::Escape, shell),
        KeyCode::Char('t') => session.fire_torpedo(now),
        KeyCode::Char('p') => session.fire_phasers(now),
        KeyCode::Char('m') => session.travel_to(now),
        KeyCode::Char('d') => session.dock_ship(),
        KeyCode::Char(c) => session.on_key_down(Key::Other(c), shell),
        _ => {}
    }
    false
}

fn handle_mouse(mouse: MouseEvent, session: &mut GameSession, shell: &mut TerminalShell) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            match shell.cell_at(mouse.column, mouse.row) {
                Some(cell) => session.on_pointer_move(cell, shell),
                None => session.on_pointer_out(shell),
            }
        }
        MouseEventKind::Down(_) => session.on_pointer_down(),
        MouseEventKind::Up(_) => session.on_pointer_up(shell),
        _ => {}
    }
}
