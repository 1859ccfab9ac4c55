use models::Selectable;

use crate::removal::RemovalHandle;

/// Stable identity of a constructed tab view.
///
/// Ids are handed out in creation order by the owning strip and are never
/// reused, so a stale id simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u64);

impl ViewId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// A renderable button bound one-to-one with a tab item.
///
/// The strip default-constructs one view per item, binds it to a removal
/// handle and then only ever tells it which state to draw.
pub trait TabView: Default {
    type Item: Selectable;

    /// Receive the handle used to ask for this tab's removal.
    fn bind(&mut self, _removal: RemovalHandle) {}

    /// First render after construction.
    fn configure(&mut self, item: &Self::Item) {
        self.render_unselected(item);
    }

    fn render_selected(&mut self, item: &Self::Item);

    fn render_unselected(&mut self, item: &Self::Item);

    /// Render according to the item's own selection flag.
    fn render(&mut self, item: &Self::Item) {
        if item.is_selected() {
            self.render_selected(item);
        } else {
            self.render_unselected(item);
        }
    }
}
