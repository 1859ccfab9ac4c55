use models::{Selectable, TabItem};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use tabs::{RemovalHandle, TabView};

/// Glyph drawn at the end of the selected tab; clicking it closes the tab.
const CLOSE_GLYPH: &str = "×";

/// A tab button drawn as a highlighted label.
#[derive(Default)]
pub struct ButtonView {
    label: String,
    selected: bool,
    removal: Option<RemovalHandle>,
}

impl ButtonView {
    /// Cells needed to draw `item`: one cell of padding on each side, plus
    /// the close glyph and its padding when selected.
    pub fn width_for(item: &TabItem) -> u16 {
        let label = Line::from(item.label.as_str()).width() as u16;
        label + 2 + if item.is_selected() { 2 } else { 0 }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn text(&self) -> String {
        if self.selected {
            format!(" {} {} ", self.label, CLOSE_GLYPH)
        } else {
            format!(" {} ", self.label)
        }
    }

    /// Whether column `x` (relative to the button's left edge) of a button
    /// `width` cells wide is the close glyph.
    pub fn is_close_column(&self, x: u16, width: u16) -> bool {
        self.selected && width >= 2 && x == width - 2
    }

    /// Ask the owning controller to close this tab.
    pub fn request_close(&self) -> bool {
        self.removal.as_ref().is_some_and(RemovalHandle::request_removal)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = if self.selected {
            Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };
        f.render_widget(Block::default().style(style), area);

        let middle = Rect { y: area.y + area.height / 2, height: 1, ..area };
        f.render_widget(Paragraph::new(self.text()).style(style), middle);
    }
}

impl TabView for ButtonView {
    type Item = TabItem;

    fn bind(&mut self, removal: RemovalHandle) {
        self.removal = Some(removal);
    }

    fn render_selected(&mut self, item: &TabItem) {
        self.label = item.label.clone();
        self.selected = true;
    }

    fn render_unselected(&mut self, item: &TabItem) {
        self.label = item.label.clone();
        self.selected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(label: &str) -> TabItem {
        let mut item = TabItem::new(label);
        item.set_selected(true);
        item
    }

    #[test]
    fn width_matches_drawn_text() {
        let mut view = ButtonView::default();

        view.render_unselected(&TabItem::new("inbox"));
        assert_eq!(view.text().chars().count() as u16, ButtonView::width_for(&TabItem::new("inbox")));

        view.render_selected(&selected("inbox"));
        assert_eq!(view.text(), " inbox × ");
        assert_eq!(view.text().chars().count() as u16, ButtonView::width_for(&selected("inbox")));
    }

    #[test]
    fn close_column_only_on_selected_tab() {
        let mut view = ButtonView::default();
        view.render_unselected(&TabItem::new("ab"));
        assert!(!view.is_close_column(2, 4));

        view.render_selected(&selected("ab"));
        // " ab × " is six cells wide with the glyph at column four.
        assert!(view.is_close_column(4, 6));
        assert!(!view.is_close_column(1, 6));
    }

    #[test]
    fn unbound_view_cannot_close() {
        assert!(!ButtonView::default().request_close());
    }
}
