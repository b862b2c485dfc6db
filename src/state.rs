use crate::pool::ChipId;
use crate::runner::TestRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Running,
    Results,
}

/// What the user currently has "in hand". Keyboard drag works in two steps:
/// grab a chip (or a filled slot), then name the destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Chip(ChipId),
    Slot(usize),
}

pub struct AppState {
    pub title: String,
    pub instructions: String,
    pub runner: TestRunner,
    pub screen: Screen,
    pub grab: Option<Grab>,
    /// Transient status line message, cleared on the next keypress.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(title: String, instructions: String, runner: TestRunner) -> Self {
        AppState {
            title,
            instructions,
            runner,
            screen: Screen::Running,
            grab: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn clear_grab(&mut self) {
        self.grab = None;
    }
}
