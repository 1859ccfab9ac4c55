use std::time::Duration;

use crossterm::event::KeyCode;
use models::{Appearance, TabItem};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tabs::TabsController;
use tracing::debug;

use crate::delegate::DemoDelegate;
use crate::events::EventLog;
use crate::screens::{screen_for, Screen};
use crate::widgets::{clip_span, in_area};
use crate::DemoConfig;

const HELP: &str =
    " t/Tab: next  BackTab: previous  n: new  i: insert  x: close  r: reload  u: case  q: quit ";

/// Top-level application state: a tabs controller plus the areas it was last
/// drawn into, used for hit-testing.
pub struct App {
    tabs: TabsController<DemoDelegate>,
    log: EventLog,
    labels: Vec<String>,
    created: usize,
    upper: bool,
    strip_area: Option<Rect>,
    content_area: Option<Rect>,
}

impl App {
    pub fn new(config: DemoConfig) -> tabs::Result<Self> {
        let log = EventLog::new();
        let mut controller = TabsController::new(DemoDelegate::new(log.clone()), config.appearance)
            .with_transition_duration(config.transition);
        controller.set_placeholder(config.placeholder);

        let mut app = Self {
            tabs: controller,
            log,
            created: config.labels.len(),
            labels: config.labels,
            upper: false,
            strip_area: None,
            content_area: None,
        };
        app.reload()?;
        Ok(app)
    }

    pub fn controller(&self) -> &TabsController<DemoDelegate> {
        &self.tabs
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn strip_area(&self) -> Option<Rect> {
        self.strip_area
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Rebuild every tab from the configured labels.
    pub fn reload(&mut self) -> tabs::Result<()> {
        self.upper = false;
        let tabs = self.labels.iter().map(TabItem::new).collect();
        let screens = self.labels.iter().map(|label| screen_for(label, &self.log)).collect();
        self.tabs.reload(tabs, screens)
    }

    fn next_label(&mut self) -> String {
        self.created += 1;
        format!("tab {}", self.created)
    }

    pub fn append_tab(&mut self) {
        let label = self.next_label();
        let screen = screen_for(&label, &self.log);
        self.tabs.insert(TabItem::new(label), screen);
    }

    /// Insert a new tab in front of the selected one.
    pub fn insert_tab(&mut self) {
        let index = self.tabs.selected_index().unwrap_or(0);
        let label = self.next_label();
        let screen = screen_for(&label, &self.log);
        self.tabs.insert_at(index, TabItem::new(label), screen);
    }

    pub fn close_selected(&mut self) {
        if let Some(index) = self.tabs.selected_index() {
            self.tabs.remove_at(index);
        }
    }

    pub fn toggle_case(&mut self) {
        self.upper = !self.upper;
        let upper = self.upper;
        self.tabs.reload_tabs(|item| {
            let label = if upper { item.label.to_uppercase() } else { item.label.to_lowercase() };
            item.relabeled(label)
        });
    }

    pub fn tick(&mut self, dt: Duration) {
        let committed = self.tabs.tick(dt);
        if committed > 0 {
            debug!(committed, "selection settled");
        }
    }

    fn visible_width(&self) -> Option<u16> {
        self.strip_area.map(|area| self.tabs.appearance().content_width(area.width))
    }

    fn follow_selection(&mut self) {
        if let Some(visible) = self.visible_width() {
            self.tabs.scroll_strip_to_selected(visible);
        }
    }

    /// The screen under the strip's current selection, which is already
    /// sliding in even while its transition runs.
    fn visible_screen_mut(&mut self) -> Option<&mut Box<dyn Screen>> {
        let index = self.tabs.selected_index()?;
        let id = *self.tabs.screen_ids().get(index)?;
        self.tabs.screen_mut(id)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        // Let the visible screen try to consume the key first.
        if let Some(screen) = self.visible_screen_mut() {
            if screen.handle_key(key) {
                return true;
            }
        }

        match key {
            KeyCode::Char('t') | KeyCode::Tab => {
                self.tabs.select_next();
            }
            KeyCode::BackTab => {
                self.tabs.select_previous();
            }
            KeyCode::Char('n') => self.append_tab(),
            KeyCode::Char('i') => self.insert_tab(),
            KeyCode::Char('x') | KeyCode::Delete => self.close_selected(),
            KeyCode::Char('r') => {
                if let Err(e) = self.reload() {
                    self.log.push(format!("reload failed: {e}"));
                }
            }
            KeyCode::Char('u') => self.toggle_case(),
            _ => return false,
        }
        self.follow_selection();
        true
    }

    pub fn handle_click(&mut self, col: u16, row: u16) {
        if let Some(area) = self.strip_area {
            if in_area(col, row, area) {
                self.click_strip(col, area);
                return;
            }
        }
        if self.content_area.is_some_and(|a| in_area(col, row, a)) {
            if let Some(screen) = self.visible_screen_mut() {
                screen.handle_click(col, row);
            }
        }
    }

    /// Wheel over the strip scrolls it sideways, anywhere else scrolls the
    /// visible screen.
    pub fn handle_scroll(&mut self, col: u16, row: u16, down: bool) {
        if let Some(area) = self.strip_area.filter(|a| in_area(col, row, *a)) {
            let visible = self.tabs.appearance().content_width(area.width);
            self.tabs.scroll_strip(if down { 2 } else { -2 }, visible);
            return;
        }
        if let Some(screen) = self.visible_screen_mut() {
            if down {
                screen.handle_scroll_down();
            } else {
                screen.handle_scroll_up();
            }
        }
    }

    fn click_strip(&mut self, col: u16, area: Rect) {
        let origin = area.x + self.tabs.appearance().left_spacing;
        if col < origin {
            return;
        }
        let strip = self.tabs.strip();
        let x = col - origin + strip.scroll_offset();

        // The close glyph sits where the selected tab settles, even while
        // widths are still animating towards it.
        let closing = strip.layout().into_iter().find(|f| f.contains_x(x)).is_some_and(|frame| {
            strip
                .view(frame.view)
                .is_some_and(|button| button.is_close_column(x - frame.x, frame.width) && button.request_close())
        });
        if closing {
            self.tabs.process_removal_requests();
        } else if let Some(frame) =
            strip.frames(self.tabs.timeline()).into_iter().find(|f| f.contains_x(x))
        {
            self.tabs.tap(frame.view);
        }
        self.follow_selection();
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render(&mut self, f: &mut Frame) {
        let appearance = self.tabs.appearance().clone();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(appearance.total_height()),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        if self.tabs.is_strip_hidden() {
            self.strip_area = None;
            self.content_area = None;
            let area = Rect { height: chunks[0].height + chunks[1].height, ..chunks[0] };
            self.render_placeholder(f, area);
        } else {
            self.render_strip(f, chunks[0], &appearance);
            self.render_content(f, chunks[1]);
        }

        f.render_widget(Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)), chunks[2]);
    }

    fn render_placeholder(&self, f: &mut Frame, area: Rect) {
        let text = self.tabs.placeholder().unwrap_or("No tabs");
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_strip(&mut self, f: &mut Frame, area: Rect, appearance: &Appearance) {
        self.strip_area = Some(area);
        f.render_widget(Block::default().style(Style::default().bg(appearance.background)), area);

        let origin = area.x + appearance.left_spacing;
        let visible = appearance.content_width(area.width);
        let strip = self.tabs.strip();
        let scroll = strip.scroll_offset() as i64;
        let height = appearance.strip_height.min(area.height);

        for frame in strip.frames(self.tabs.timeline()) {
            let Some((start, width)) = clip_span(frame.x as i64 - scroll, frame.width, visible) else {
                continue;
            };
            if let Some(button) = strip.view(frame.view) {
                button.render(f, Rect { x: origin + start, y: area.y, width, height });
            }
        }

        if let Some(span) = strip.indicator_frame(self.tabs.timeline()) {
            let Some((start, width)) = clip_span(span.x as i64 - scroll, span.width, visible) else {
                return;
            };
            let y = area.y + height;
            let rows = appearance.indicator_height().min((area.y + area.height).saturating_sub(y));
            let bar = Rect { x: origin + start, y, width, height: rows };
            f.render_widget(Block::default().style(Style::default().bg(appearance.indicator_color)), bar);
        }
    }

    fn render_content(&mut self, f: &mut Frame, area: Rect) {
        self.content_area = Some(area);
        let viewport = self.tabs.screen_frames().first().map(|s| (s.width, s.height));
        if viewport != Some((area.width, area.height)) {
            self.tabs.layout(area.width, area.height);
        }

        let offset = self.tabs.viewport_offset() as i64;
        for frame in self.tabs.screen_frames() {
            let Some((start, width)) = clip_span(frame.x as i64 - offset, frame.width, area.width) else {
                continue;
            };
            if let Some(screen) = self.tabs.screen_mut(frame.screen) {
                screen.render(f, Rect { x: area.x + start, width, ..area });
            }
        }
    }
}
