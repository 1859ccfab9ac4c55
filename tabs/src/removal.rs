use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::view::ViewId;

/// Pending removal requests raised by tab views.
///
/// The queue is owned by the strip. Views only ever see a [`RemovalHandle`],
/// which holds a weak reference, so a view can never keep its owner alive.
#[derive(Debug, Default)]
pub struct RemovalQueue {
    pending: Rc<RefCell<VecDeque<ViewId>>>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the handle a freshly built view gets bound to.
    pub fn handle_for(&self, view: ViewId) -> RemovalHandle {
        RemovalHandle { view, queue: Rc::downgrade(&self.pending) }
    }

    /// Take every request raised since the last drain, oldest first.
    pub fn drain(&self) -> Vec<ViewId> {
        self.pending.borrow_mut().drain(..).collect()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

/// Non-owning back-reference from a view to whoever removes it.
#[derive(Clone, Debug)]
pub struct RemovalHandle {
    view: ViewId,
    queue: Weak<RefCell<VecDeque<ViewId>>>,
}

impl RemovalHandle {
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Ask for this view's tab to be removed.
    ///
    /// Returns `false` when the owning strip is already gone. Asking twice
    /// before the owner drains the queue records a single request.
    pub fn request_removal(&self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        let mut queue = queue.borrow_mut();
        if !queue.contains(&self.view) {
            queue.push_back(self.view);
        }
        true
    }
}
