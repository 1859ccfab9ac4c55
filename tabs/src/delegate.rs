use crate::view::TabView;

/// Item type carried by a delegate's views.
pub type ItemOf<D> = <<D as TabsDelegate>::View as TabView>::Item;

/// What a standalone [`TabStrip`](crate::TabStrip) needs from its owner.
///
/// Any `FnMut(&Item) -> u16` closure works as a delegate that only sizes
/// tabs.
pub trait StripDelegate<V: TabView> {
    /// Width of the tab showing `item` in its current selection state.
    fn width_for_item(&mut self, item: &V::Item) -> u16;

    /// Called once per view, right after it was built and configured.
    fn will_display_view(&mut self, _view: &mut V, _item: &V::Item) {}
}

impl<V, F> StripDelegate<V> for F
where
    V: TabView,
    F: FnMut(&V::Item) -> u16,
{
    fn width_for_item(&mut self, item: &V::Item) -> u16 {
        self(item)
    }
}

/// Host application hooks for a [`TabsController`](crate::TabsController).
///
/// Only `width_for_item` is required; every lifecycle callback defaults to
/// a no-op.
pub trait TabsDelegate {
    type View: TabView;
    type Screen;

    /// Width of the tab showing `item`, queried whenever a tab is first laid
    /// out and every time its selection state flips.
    fn width_for_item(&mut self, item: &ItemOf<Self>) -> u16;

    fn will_display_view(&mut self, _view: &mut Self::View, _item: &ItemOf<Self>) {}

    fn will_remove_tab(&mut self, _item: &ItemOf<Self>) {}
    fn did_remove_tab(&mut self, _item: &ItemOf<Self>) {}

    fn will_show_tab(&mut self, _item: &ItemOf<Self>) {}
    fn did_show_tab(&mut self, _item: &ItemOf<Self>) {}

    fn will_appear_screen(&mut self, _screen: &mut Self::Screen) {}
    fn did_appear_screen(&mut self, _screen: &mut Self::Screen) {}
    fn will_disappear_screen(&mut self, _screen: &mut Self::Screen) {}
    fn did_disappear_screen(&mut self, _screen: &mut Self::Screen) {}
}

/// Presents a [`TabsDelegate`] to the strip it drives.
pub(crate) struct Sizing<'a, D>(pub(crate) &'a mut D);

impl<D: TabsDelegate> StripDelegate<D::View> for Sizing<'_, D> {
    fn width_for_item(&mut self, item: &ItemOf<D>) -> u16 {
        self.0.width_for_item(item)
    }

    fn will_display_view(&mut self, view: &mut D::View, item: &ItemOf<D>) {
        self.0.will_display_view(view, item);
    }
}
