use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Screen;
use crate::widgets::in_area;

/// A simple page that counts clicks and how often it was shown.
pub struct NoteScreen {
    title: String,
    click_count: u32,
    last_click: Option<(u16, u16)>,
    appearances: u32,
    focused: bool,
    area: Option<Rect>,
}

impl NoteScreen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            click_count: 0,
            last_click: None,
            appearances: 0,
            focused: false,
            area: None,
        }
    }
}

impl Screen for NoteScreen {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        if self.area.is_some_and(|a| in_area(col, row, a)) {
            self.click_count += 1;
            self.last_click = Some((col, row));
        }
    }

    fn on_appear(&mut self) {
        self.appearances += 1;
        self.focused = true;
    }

    fn on_disappear(&mut self) {
        self.focused = false;
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        self.area = Some(area);

        let click_info = if let Some((x, y)) = self.last_click {
            format!("Last click: ({}, {}) | Total clicks: {}", x, y, self.click_count)
        } else {
            "Click anywhere!".to_string()
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Shown {} time(s)", self.appearances)),
            Line::from(""),
            Line::from(Span::styled(click_info, Style::default().fg(Color::Cyan))),
        ];

        let border = if self.focused { Color::Blue } else { Color::DarkGray };
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", self.title)),
            )
            .alignment(Alignment::Center);

        f.render_widget(paragraph, area);
    }
}
