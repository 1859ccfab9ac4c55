use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// How many lifecycle lines are kept around.
const CAPACITY: usize = 200;

/// Shared, bounded record of tab lifecycle events, newest last.
#[derive(Clone, Default)]
pub struct EventLog {
    lines: Rc<RefCell<VecDeque<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        let mut lines = self.lines.borrow_mut();
        if lines.len() == CAPACITY {
            lines.pop_front();
        }
        lines.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.borrow().back().cloned()
    }
}
