//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; this module only translates core
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::game_state::GameSession;
use crate::io::{cell_from_pixel, Dialog, UiShell};
use crate::models::constants::{READOUT_LINES, SECTOR_SIZE};
use crate::models::position::Cell;
use crate::models::sector::Sector;

/// Terminal cell footprint of one grid cell.
pub const CELL_W: u16 = 4;
pub const CELL_H: u16 = 2;
/// Top-left corner of the grid on screen.
pub const GRID_X: u16 = 2;
pub const GRID_Y: u16 = 1;

const C_GRID: Color = Color::DarkGreen;
const C_STAR: Color = Color::Yellow;
const C_BASE_FRIEND: Color = Color::Cyan;
const C_BASE_FOE: Color = Color::DarkYellow;
const C_ENEMY: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_TORPEDO: Color = Color::Magenta;
const C_BEAM: Color = Color::Red;
const C_HOVER: Color = Color::DarkGrey;
const C_LOCK: Color = Color::Green;
const C_TEXT: Color = Color::Grey;

/// Collects what the core pushes across the boundary; the event loop
/// renders from it.
pub struct TerminalShell {
    pub readout: [String; READOUT_LINES],
    /// Set by redraw requests; the event loop clears it after painting.
    pub dirty: bool,
    pub active_dialog: Option<Dialog>,
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalShell {
    pub fn new() -> Self {
        TerminalShell {
            readout: Default::default(),
            dirty: true,
            active_dialog: None,
        }
    }

    /// Map a terminal position to a grid cell, if it falls on the grid.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        let px = column as f64 - GRID_X as f64;
        let py = row as f64 - GRID_Y as f64;
        cell_from_pixel(
            px,
            py,
            (SECTOR_SIZE as u16 * CELL_W) as f64,
            (SECTOR_SIZE as u16 * CELL_H) as f64,
        )
    }
}

impl UiShell for TerminalShell {
    fn set_readout_line(&mut self, line: usize, text: &str) {
        if line < self.readout.len() && self.readout[line] != text {
            self.readout[line] = text.to_string();
            self.dirty = true;
        }
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
        self.dirty = true;
    }

    fn prompt_save_name(&mut self) -> Option<String> {
        // Raw-mode text entry is not worth the trouble for a save that is
        // never written; accept a fixed name.
        Some("quicksave".to_string())
    }
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    shell: &TerminalShell,
    session: &GameSession,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_grid(out)?;
    if let Some(sector) = session.sector() {
        draw_sector(out, sector)?;
    }
    draw_readout(out, shell)?;
    draw_hints(out)?;

    if let Some(dialog) = shell.active_dialog {
        draw_dialog(out, dialog)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()
}

fn glyph_position(cell: Cell) -> (u16, u16) {
    (
        GRID_X + cell.x as u16 * CELL_W + CELL_W / 2 - 1,
        GRID_Y + cell.y as u16 * CELL_H + CELL_H / 2,
    )
}

fn draw_glyph<W: Write>(out: &mut W, cell: Cell, glyph: &str, color: Color) -> std::io::Result<()> {
    let (x, y) = glyph_position(cell);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_grid<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_GRID))?;
    let w = SECTOR_SIZE as u16 * CELL_W;
    let h = SECTOR_SIZE as u16 * CELL_H;
    for gy in 0..=h {
        for gx in 0..=w {
            let on_row = gy % CELL_H == 0;
            let on_col = gx % CELL_W == 0;
            let ch = match (on_row, on_col) {
                (true, true) => '+',
                (true, false) => '-',
                (false, true) => '|',
                (false, false) => continue,
            };
            out.queue(cursor::MoveTo(GRID_X + gx, GRID_Y + gy))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn draw_sector<W: Write>(out: &mut W, sector: &Sector) -> std::io::Result<()> {
    // Cursor markers go underneath the entities.
    if let Some(hover) = sector.hover {
        draw_glyph(out, hover, "[ ]", C_HOVER)?;
    }
    if let Some(lock) = sector.lock {
        draw_glyph(out, lock, "[X]", C_LOCK)?;
    }

    for star in &sector.stars {
        draw_glyph(out, star.cell, " * ", C_STAR)?;
    }
    for base in &sector.bases {
        let (glyph, color) = if base.friendly {
            (">!<", C_BASE_FRIEND)
        } else {
            (">X<", C_BASE_FOE)
        };
        draw_glyph(out, base.cell, glyph, color)?;
    }
    for enemy in &sector.enemies {
        draw_glyph(out, enemy.cell, "+++", C_ENEMY)?;
    }
    draw_glyph(out, sector.ship.cell, "<*>", C_SHIP)?;

    for torpedo in &sector.torpedoes {
        if let Some(head) = torpedo.head() {
            draw_glyph(out, head, " o ", C_TORPEDO)?;
        }
    }

    // Beams render as a marker on each traced cell between the endpoints.
    for beam in &sector.phasers {
        let path = crate::services::geometry::trace_line(
            beam.from.x.floor() as i32,
            beam.from.y.floor() as i32,
            beam.to.x.floor() as i32,
            beam.to.y.floor() as i32,
        );
        for cell in path.iter().skip(1) {
            draw_glyph(out, *cell, " ~ ", C_BEAM)?;
        }
    }
    Ok(())
}

fn draw_readout<W: Write>(out: &mut W, shell: &TerminalShell) -> std::io::Result<()> {
    let x = GRID_X + SECTOR_SIZE as u16 * CELL_W + 4;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    for (i, line) in shell.readout.iter().enumerate() {
        out.queue(cursor::MoveTo(x, GRID_Y + 1 + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_hints<W: Write>(out: &mut W) -> std::io::Result<()> {
    let y = GRID_Y + SECTOR_SIZE as u16 * CELL_H + 2;
    out.queue(cursor::MoveTo(GRID_X, y))?;
    out.queue(style::SetForegroundColor(C_HOVER))?;
    out.queue(Print(
        "mouse: hover + click to lock   t: torpedo  p: phasers  m: travel  d: dock  Esc: menu  q: quit",
    ))?;
    Ok(())
}

fn draw_dialog<W: Write>(out: &mut W, dialog: Dialog) -> std::io::Result<()> {
    let lines: &[&str] = match dialog {
        Dialog::MainMenu => &[
            "*** WEB TREK ***",
            "",
            "[n] New Game",
            "[l] Load Game",
            "[q] Quit",
        ],
        Dialog::EscapeMenu => &[
            "--- PAUSED ---",
            "",
            "[r] Resume",
            "[s] Save Game",
            "[b] Main Menu",
        ],
        Dialog::LoadGame => &[
            "--- LOAD GAME ---",
            "",
            "[Enter] Load selected",
            "[Esc]   Cancel",
        ],
    };

    let x = GRID_X + 8;
    let y = GRID_Y + 4;
    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(x, y + i as u16))?;
        out.queue(Print(format!("{:<28}", line)))?;
    }
    Ok(())
}
