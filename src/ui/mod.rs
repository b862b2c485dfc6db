pub mod keybar;
pub mod layout;
pub mod markdown;
pub mod question;
pub mod result;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();

    match state.screen {
        Screen::Running => {
            let layout = layout::compute_layout(area);
            titlebar::draw_titlebar(f, layout.titlebar, state);
            question::draw_question(f, layout.main, state);
            statusbar::draw_statusbar(f, layout.statusbar, state);
            keybar::draw_keybar(f, layout.keybar, state);
        }
        Screen::Results => {
            result::draw_results(f, area, state);
        }
    }
}
