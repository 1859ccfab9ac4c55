//! Recording fixtures shared by the unit tests.

use models::{Selectable, TabItem};

use crate::delegate::{ItemOf, StripDelegate, TabsDelegate};
use crate::removal::RemovalHandle;
use crate::view::TabView;

pub fn tabs(labels: &[&str]) -> Vec<TabItem> {
    labels.iter().map(|label| TabItem::new(*label)).collect()
}

pub fn pages(labels: &[&str]) -> Vec<Page> {
    labels.iter().map(|label| Page { name: label.to_string() }).collect()
}

/// View that remembers the last state it was asked to draw.
#[derive(Default)]
pub struct RecordingView {
    pub shown: Option<(String, bool)>,
    pub handle: Option<RemovalHandle>,
}

impl TabView for RecordingView {
    type Item = TabItem;

    fn bind(&mut self, removal: RemovalHandle) {
        self.handle = Some(removal);
    }

    fn render_selected(&mut self, item: &TabItem) {
        self.shown = Some((item.label.clone(), true));
    }

    fn render_unselected(&mut self, item: &TabItem) {
        self.shown = Some((item.label.clone(), false));
    }
}

#[derive(Debug, PartialEq)]
pub struct Page {
    pub name: String,
}

/// Delegate logging every callback as `"<hook>:<name>"`.
///
/// Tabs are sized as their label length, two cells wider when selected.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
    pub width_queries: usize,
}

impl Recorder {
    pub fn count(&self, hook: &str) -> usize {
        self.events.iter().filter(|event| event.split(':').next() == Some(hook)).count()
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }

    fn width(&mut self, item: &TabItem) -> u16 {
        self.width_queries += 1;
        item.label.len() as u16 + if item.is_selected() { 2 } else { 0 }
    }

    fn log(&mut self, hook: &str, name: &str) {
        self.events.push(format!("{hook}:{name}"));
    }
}

impl StripDelegate<RecordingView> for Recorder {
    fn width_for_item(&mut self, item: &TabItem) -> u16 {
        self.width(item)
    }

    fn will_display_view(&mut self, _view: &mut RecordingView, item: &TabItem) {
        self.log("will_display", &item.label);
    }
}

impl TabsDelegate for Recorder {
    type View = RecordingView;
    type Screen = Page;

    fn width_for_item(&mut self, item: &ItemOf<Self>) -> u16 {
        self.width(item)
    }

    fn will_display_view(&mut self, _view: &mut RecordingView, item: &TabItem) {
        self.log("will_display", &item.label);
    }

    fn will_remove_tab(&mut self, item: &TabItem) {
        self.log("will_remove", &item.label);
    }

    fn did_remove_tab(&mut self, item: &TabItem) {
        self.log("did_remove", &item.label);
    }

    fn will_show_tab(&mut self, item: &TabItem) {
        self.log("will_show", &item.label);
    }

    fn did_show_tab(&mut self, item: &TabItem) {
        self.log("did_show", &item.label);
    }

    fn will_appear_screen(&mut self, screen: &mut Page) {
        self.log("will_appear", &screen.name);
    }

    fn did_appear_screen(&mut self, screen: &mut Page) {
        self.log("did_appear", &screen.name);
    }

    fn will_disappear_screen(&mut self, screen: &mut Page) {
        self.log("will_disappear", &screen.name);
    }

    fn did_disappear_screen(&mut self, screen: &mut Page) {
        self.log("did_disappear", &screen.name);
    }
}
