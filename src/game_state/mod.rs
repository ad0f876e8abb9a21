//! The mode state machine and the session aggregate.
//!
//! [`GameSession`] owns the galaxy, the active sector, the RNG and the
//! mode stack. The shell feeds it discrete events (keys, pointer, ticks)
//! and invokes its command methods from buttons; modes are a plain enum
//! dispatched by `match`, with a push/pop stack for modal overlays.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::io::{Dialog, UiShell};
use crate::models::galaxy::{Galaxy, GenerationPlan};
use crate::models::position::{Cell, QuadrantPosition};
use crate::models::sector::Sector;
use crate::services::engine;

/// Top-level application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MainMenu,
    NewGame,
    LoadGame,
    SaveGame,
    ShortRange,
    LongRange,
    EscapeMenu,
    GameOver,
}

/// A key event as the core sees it. The shell maps whatever its input
/// device produces into this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(char),
}

/// One running game: mode machine, mode stack, galaxy, active sector.
pub struct GameSession {
    mode: Mode,
    stack: Vec<Mode>,
    galaxy: Option<Galaxy>,
    sector: Option<Sector>,
    current_quadrant: QuadrantPosition,
    rng: StdRng,
    pointer_pressed: bool,
    save_dialog_shown: bool,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        GameSession {
            mode: Mode::MainMenu,
            stack: Vec::new(),
            galaxy: None,
            sector: None,
            current_quadrant: QuadrantPosition::new(0, 0),
            rng: StdRng::seed_from_u64(seed),
            pointer_pressed: false,
            save_dialog_shown: false,
        }
    }

    /// Fire the initial mode's entry hook (opens the main menu). Call once
    /// before the event loop starts.
    pub fn start(&mut self, shell: &mut dyn UiShell) {
        self.enter(self.mode, shell);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sector(&self) -> Option<&Sector> {
        self.sector.as_ref()
    }

    pub fn galaxy(&self) -> Option<&Galaxy> {
        self.galaxy.as_ref()
    }

    pub fn current_quadrant(&self) -> QuadrantPosition {
        self.current_quadrant
    }

    // ----- state transitions -------------------------------------------

    /// Leave the current mode and enter `target`.
    pub fn set_state(&mut self, target: Mode, shell: &mut dyn UiShell) {
        self.exit(self.mode);
        self.mode = target;
        self.enter(target, shell);
    }

    /// Save the current mode for later restoration by [`pop_state`].
    /// Used before opening modal overlays.
    ///
    /// [`pop_state`]: GameSession::pop_state
    pub fn push_state(&mut self) {
        self.stack.push(self.mode);
    }

    /// Restore the most recently pushed mode, or `override_mode` instead
    /// if given. Exit and entry hooks run exactly once each.
    ///
    /// # Panics
    ///
    /// Panics when the stack is empty; pushes and pops must pair up.
    pub fn pop_state(&mut self, override_mode: Option<Mode>, shell: &mut dyn UiShell) {
        let restored = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("state stack underflow in {:?}", self.mode));
        self.exit(self.mode);
        self.mode = override_mode.unwrap_or(restored);
        self.enter(self.mode, shell);
    }

    fn enter(&mut self, mode: Mode, shell: &mut dyn UiShell) {
        debug!("enter {:?}", mode);
        match mode {
            Mode::MainMenu => shell.show_dialog(Dialog::MainMenu),
            Mode::EscapeMenu => shell.show_dialog(Dialog::EscapeMenu),
            Mode::LoadGame => shell.show_dialog(Dialog::LoadGame),
            Mode::SaveGame => self.save_dialog_shown = false,
            _ => {}
        }
    }

    fn exit(&mut self, mode: Mode) {
        debug!("exit {:?}", mode);
    }

    // ----- inbound events ----------------------------------------------

    pub fn on_key_down(&mut self, key: Key, shell: &mut dyn UiShell) {
        match self.mode {
            Mode::ShortRange => {
                if key == Key::Escape {
                    self.set_state(Mode::EscapeMenu, shell);
                } else {
                    debug!("unhandled key {:?} in {:?}", key, self.mode);
                }
            }
            _ => debug!("unhandled key {:?} in {:?}", key, self.mode),
        }
    }

    /// The fixed-cadence simulation callback. `now` is milliseconds from
    /// any monotonic origin; only differences matter.
    pub fn on_frame_update(&mut self, now: u64, shell: &mut dyn UiShell) {
        match self.mode {
            Mode::NewGame => {
                // Generate and transition on the same tick so this hook
                // never runs generation twice.
                self.new_galaxy();
                self.set_state(Mode::ShortRange, shell);
            }
            Mode::ShortRange => {
                if let Some(sector) = self.sector.as_mut() {
                    engine::tick(sector, now, &mut self.rng, shell);
                }
            }
            Mode::SaveGame => {
                if !self.save_dialog_shown {
                    self.save_dialog_shown = true;
                    match shell.prompt_save_name() {
                        Some(name) => {
                            // Persistence is intentionally unimplemented;
                            // the name is acknowledged and discarded.
                            info!("save requested as {:?}", name);
                            self.set_state(Mode::ShortRange, shell);
                        }
                        None => self.set_state(Mode::EscapeMenu, shell),
                    }
                }
            }
            _ => {}
        }
    }

    pub fn on_pointer_move(&mut self, cell: Cell, shell: &mut dyn UiShell) {
        if self.mode != Mode::ShortRange {
            return;
        }
        if let Some(sector) = self.sector.as_mut() {
            if sector.hover != Some(cell) {
                sector.hover = Some(cell);
                shell.request_redraw();
            }
        }
    }

    pub fn on_pointer_out(&mut self, shell: &mut dyn UiShell) {
        if self.mode != Mode::ShortRange {
            return;
        }
        if let Some(sector) = self.sector.as_mut() {
            sector.hover = None;
            shell.request_redraw();
        }
    }

    pub fn on_pointer_down(&mut self) {
        self.pointer_pressed = true;
    }

    /// A release after a press commits the hovered cell as the new
    /// targeting lock.
    pub fn on_pointer_up(&mut self, shell: &mut dyn UiShell) {
        let was_pressed = std::mem::replace(&mut self.pointer_pressed, false);
        if self.mode != Mode::ShortRange {
            return;
        }
        if let Some(sector) = self.sector.as_mut() {
            if was_pressed {
                if let Some(hover) = sector.hover {
                    sector.lock = Some(hover);
                }
            }
            shell.request_redraw();
        }
    }

    // ----- outbound commands (shell buttons) ---------------------------

    pub fn fire_torpedo(&mut self, now: u64) {
        if let Some(sector) = self.sector.as_mut() {
            engine::fire_torpedo(sector, now);
        }
    }

    pub fn fire_phasers(&mut self, now: u64) {
        if let Some(sector) = self.sector.as_mut() {
            engine::fire_phasers(sector, now);
        }
    }

    pub fn travel_to(&mut self, now: u64) {
        if let Some(sector) = self.sector.as_mut() {
            engine::travel_to(sector, now);
        }
    }

    /// Reserved hook; docking has no behavior yet.
    pub fn dock_ship(&mut self) {}

    pub fn request_new_game(&mut self, shell: &mut dyn UiShell) {
        self.set_state(Mode::NewGame, shell);
    }

    pub fn request_load_game(&mut self, shell: &mut dyn UiShell) {
        self.push_state();
        self.set_state(Mode::LoadGame, shell);
    }

    pub fn request_save_game(&mut self, shell: &mut dyn UiShell) {
        self.set_state(Mode::SaveGame, shell);
    }

    pub fn request_main_menu(&mut self, shell: &mut dyn UiShell) {
        self.set_state(Mode::MainMenu, shell);
    }

    /// Confirm the load dialog. No serialized state exists, so loading
    /// mirrors a new game: fresh galaxy, quadrant (0,0).
    pub fn confirm_load_selection(&mut self, shell: &mut dyn UiShell) {
        self.new_galaxy();
        self.pop_state(Some(Mode::ShortRange), shell);
    }

    /// Cancel the load dialog, restoring whatever mode was pushed.
    pub fn cancel_load_game(&mut self, shell: &mut dyn UiShell) {
        self.pop_state(None, shell);
    }

    // ----- galaxy/sector management ------------------------------------

    fn new_galaxy(&mut self) {
        let plan = GenerationPlan::new_game(&mut self.rng);
        self.galaxy = Some(Galaxy::generate(&mut self.rng, &plan));
        self.load_quadrant(QuadrantPosition::new(0, 0));
    }

    /// Rebuild the active sector from the given quadrant, discarding all
    /// transient combat state.
    pub fn load_quadrant(&mut self, pos: QuadrantPosition) {
        let galaxy = self
            .galaxy
            .as_ref()
            .expect("load_quadrant called before galaxy generation");
        info!("loading quadrant ({},{})", pos.x, pos.y);
        self.sector = Some(Sector::load_from_quadrant(
            galaxy.quadrant_at(pos),
            &mut self.rng,
        ));
        self.current_quadrant = pos;
    }
}
