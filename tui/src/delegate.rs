use models::TabItem;
use tabs::TabsDelegate;

use crate::button::ButtonView;
use crate::events::EventLog;
use crate::screens::Screen;

/// Sizes tab buttons and records every lifecycle hook.
pub struct DemoDelegate {
    log: EventLog,
}

impl DemoDelegate {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

impl TabsDelegate for DemoDelegate {
    type View = ButtonView;
    type Screen = Box<dyn Screen>;

    fn width_for_item(&mut self, item: &TabItem) -> u16 {
        ButtonView::width_for(item)
    }

    fn will_display_view(&mut self, _view: &mut ButtonView, item: &TabItem) {
        self.log.push(format!("display {item}"));
    }

    fn will_remove_tab(&mut self, item: &TabItem) {
        self.log.push(format!("will remove {item}"));
    }

    fn did_remove_tab(&mut self, item: &TabItem) {
        self.log.push(format!("did remove {item}"));
    }

    fn will_show_tab(&mut self, item: &TabItem) {
        self.log.push(format!("will show {item}"));
    }

    fn did_show_tab(&mut self, item: &TabItem) {
        self.log.push(format!("did show {item}"));
    }

    fn will_appear_screen(&mut self, screen: &mut Box<dyn Screen>) {
        self.log.push(format!("will appear {}", screen.title()));
    }

    fn did_appear_screen(&mut self, screen: &mut Box<dyn Screen>) {
        screen.on_appear();
        self.log.push(format!("did appear {}", screen.title()));
    }

    fn will_disappear_screen(&mut self, screen: &mut Box<dyn Screen>) {
        screen.on_disappear();
        self.log.push(format!("will disappear {}", screen.title()));
    }

    fn did_disappear_screen(&mut self, screen: &mut Box<dyn Screen>) {
        self.log.push(format!("did disappear {}", screen.title()));
    }
}
