use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::Screen;
use crate::events::EventLog;
use crate::widgets::{list_next, list_previous};

pub const TITLE: &str = "activity";

/// Scrollable view over the tab lifecycle log.
pub struct ActivityScreen {
    log: EventLog,
    list_state: ListState,
    /// Keep the newest line selected until the user scrolls away.
    follow: bool,
}

impl ActivityScreen {
    pub fn new(log: EventLog) -> Self {
        Self { log, list_state: ListState::default(), follow: true }
    }

    fn scroll(&mut self, down: bool) {
        let len = self.log.len();
        if down {
            list_next(&mut self.list_state, len);
        } else {
            list_previous(&mut self.list_state, len);
        }
        self.follow = self.list_state.selected() == Some(len.saturating_sub(1));
    }
}

impl Screen for ActivityScreen {
    fn title(&self) -> &str {
        TITLE
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll(true);
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll(false);
                true
            }
            KeyCode::End => {
                self.follow = true;
                true
            }
            _ => false,
        }
    }

    fn handle_scroll_down(&mut self) {
        self.scroll(true);
    }

    fn handle_scroll_up(&mut self) {
        self.scroll(false);
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        let lines = self.log.lines();
        if self.follow {
            self.list_state.select(lines.len().checked_sub(1));
        }

        let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Activity (j/k to scroll, End to follow) "),
            )
            .highlight_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD));

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
