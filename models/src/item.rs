use std::hash::Hash;

/// Identity of a single tab.
///
/// Equality and hashing cover the whole value, the selection flag included,
/// so two items that only differ in selection are different values. The
/// strip therefore tracks tabs by position, never by value.
pub trait Selectable: Clone + Eq + Hash + Default {
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
}

/// A tab with a text label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TabItem {
    pub label: String,
    pub is_selected: bool,
}

impl TabItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), is_selected: false }
    }

    /// Copy of this item carrying a different label.
    pub fn relabeled(&self, label: impl Into<String>) -> Self {
        Self { label: label.into(), is_selected: self.is_selected }
    }
}

impl Selectable for TabItem {
    fn is_selected(&self) -> bool {
        self.is_selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }
}

impl std::fmt::Display for TabItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
