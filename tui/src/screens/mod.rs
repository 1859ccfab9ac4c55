pub mod activity;
pub mod note;

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};

use crate::events::EventLog;

/// Common interface for the content shown under a tab.
pub trait Screen {
    /// Human-readable name, used in the event log.
    fn title(&self) -> &str;

    /// Render this screen into the given area.
    fn render(&mut self, f: &mut Frame, area: Rect);

    /// Handle a key press. Return `true` if the key was consumed.
    fn handle_key(&mut self, _key: KeyCode) -> bool { false }

    /// Handle a mouse click at (`col`, `row`). Default is no-op.
    fn handle_click(&mut self, _col: u16, _row: u16) {}

    fn handle_scroll_down(&mut self) {}

    fn handle_scroll_up(&mut self) {}

    /// Called once the screen has fully slid into view.
    fn on_appear(&mut self) {}

    /// Called when the screen is about to slide out of view.
    fn on_disappear(&mut self) {}
}

/// Build the screen shown under a tab called `label`.
pub fn screen_for(label: &str, log: &EventLog) -> Box<dyn Screen> {
    if label.eq_ignore_ascii_case(activity::TITLE) {
        Box::new(activity::ActivityScreen::new(log.clone()))
    } else {
        Box::new(note::NoteScreen::new(label))
    }
}
