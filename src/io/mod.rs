//! The boundary between the core and its UI shell.
//!
//! The core never draws. It pushes readout text and redraw requests out
//! through [`UiShell`]; the shell pulls everything else (sector contents,
//! projectile positions, hover and lock cells) through plain queries and
//! renders however it likes. Mock implementations live in [`test_utils`]
//! for driving full sessions headlessly.

use crate::models::constants::SECTOR_SIZE;
use crate::models::position::Cell;

/// Modal overlays the shell is asked to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    MainMenu,
    EscapeMenu,
    LoadGame,
}

/// Callbacks the core invokes on the surrounding UI.
pub trait UiShell {
    /// Replace one of the seven status readout lines.
    fn set_readout_line(&mut self, line: usize, text: &str);

    /// Ask the shell to repaint from the core's current state.
    fn request_redraw(&mut self);

    /// Present a modal overlay.
    fn show_dialog(&mut self, dialog: Dialog);

    /// Prompt for a save-game name. `None` means the player cancelled.
    fn prompt_save_name(&mut self) -> Option<String>;
}

/// Map a pointer position in display-surface pixels to a grid cell, or
/// `None` when the pointer is off the surface.
pub fn cell_from_pixel(px: f64, py: f64, surface_w: f64, surface_h: f64) -> Option<Cell> {
    if px < 0.0 || py < 0.0 || px >= surface_w || py >= surface_h {
        return None;
    }
    Some(Cell::new(
        (px * SECTOR_SIZE as f64 / surface_w).floor() as i32,
        (py * SECTOR_SIZE as f64 / surface_h).floor() as i32,
    ))
}

/// Mock shell for tests (kept unconditionally compiled so integration
/// tests can drive sessions headlessly).
pub mod test_utils {
    use super::*;
    use std::collections::VecDeque;

    /// Records everything the core pushes across the shell boundary.
    pub struct MockShell {
        pub readout: Vec<String>,
        pub redraw_requests: usize,
        pub dialogs: Vec<Dialog>,
        /// Scripted answers for save-name prompts, consumed in order.
        pub save_name_responses: VecDeque<Option<String>>,
    }

    impl Default for MockShell {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockShell {
        pub fn new() -> Self {
            MockShell {
                readout: vec![String::new(); crate::models::constants::READOUT_LINES],
                redraw_requests: 0,
                dialogs: Vec::new(),
                save_name_responses: VecDeque::new(),
            }
        }

        pub fn with_save_name(name: Option<&str>) -> Self {
            let mut shell = Self::new();
            shell
                .save_name_responses
                .push_back(name.map(|s| s.to_string()));
            shell
        }
    }

    impl UiShell for MockShell {
        fn set_readout_line(&mut self, line: usize, text: &str) {
            if line < self.readout.len() {
                self.readout[line] = text.to_string();
            }
        }

        fn request_redraw(&mut self) {
            self.redraw_requests += 1;
        }

        fn show_dialog(&mut self, dialog: Dialog) {
            self.dialogs.push(dialog);
        }

        fn prompt_save_name(&mut self) -> Option<String> {
            self.save_name_responses
                .pop_front()
                .expect("no scripted save-name response left")
        }
    }
}
