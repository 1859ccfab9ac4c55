use std::time::Duration;

use models::Appearance;
use tracing::{debug, warn};

use crate::delegate::{ItemOf, Sizing, TabsDelegate};
use crate::error::{Result, TabsError};
use crate::strip::{Selected, TabStrip};
use crate::timeline::{Timeline, Transition, TransitionId};
use crate::view::ViewId;

/// Identity of a content screen attached to a [`TabsController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(u64);

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Where a screen sits inside the content viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenFrame {
    pub screen: ScreenId,
    pub x: u32,
    pub width: u16,
    pub height: u16,
}

struct Attached<S> {
    id: ScreenId,
    screen: S,
    /// Index at which this screen last received an appear pair.
    shown_at: Option<usize>,
}

/// A selection whose visual transition is still running. Targets are held
/// by identity so a shifted collection cannot redirect the commit.
struct PendingSelection<I> {
    transition: TransitionId,
    previous: Option<ScreenId>,
    next: ScreenId,
    item: I,
}

#[derive(Default)]
struct Viewport {
    width: u16,
    height: u16,
    /// Offset the viewport is settled at, or heading to.
    offset: u32,
}

/// A tab strip stacked above a viewport of content screens.
///
/// Screens stay index-aligned with the strip's tabs: every public mutator
/// updates both sides before returning. All screens are attached at once
/// and laid out side by side; selection only slides the viewport.
pub struct TabsController<D: TabsDelegate> {
    delegate: D,
    strip: TabStrip<D::View>,
    screens: Vec<Attached<D::Screen>>,
    selected_screen: Option<ScreenId>,
    pending: Vec<PendingSelection<ItemOf<D>>>,
    timeline: Timeline,
    viewport: Viewport,
    placeholder: Option<String>,
    placeholder_visible: bool,
    next_screen: u64,
}

impl<D: TabsDelegate> TabsController<D> {
    pub fn new(delegate: D, appearance: Appearance) -> Self {
        Self {
            delegate,
            strip: TabStrip::new(appearance),
            screens: Vec::new(),
            selected_screen: None,
            pending: Vec::new(),
            timeline: Timeline::new(),
            viewport: Viewport::default(),
            placeholder: None,
            placeholder_visible: false,
            next_screen: 0,
        }
    }

    /// Show `text` instead of the tabs whenever there are none.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.set_placeholder(Some(text.into()));
        self
    }

    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.timeline.set_duration(duration);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn strip(&self) -> &TabStrip<D::View> {
        &self.strip
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn appearance(&self) -> &Appearance {
        self.strip.appearance()
    }

    pub fn items(&self) -> &[ItemOf<D>] {
        self.strip.items()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.strip.selected_index()
    }

    /// The screen whose selection transition last completed.
    pub fn selected_screen(&self) -> Option<&D::Screen> {
        self.selected_screen.and_then(|id| self.screen(id))
    }

    pub fn selected_screen_id(&self) -> Option<ScreenId> {
        self.selected_screen
    }

    pub fn screen_ids(&self) -> Vec<ScreenId> {
        self.screens.iter().map(|attached| attached.id).collect()
    }

    pub fn screens(&self) -> impl Iterator<Item = &D::Screen> {
        self.screens.iter().map(|attached| &attached.screen)
    }

    pub fn screen(&self, id: ScreenId) -> Option<&D::Screen> {
        self.screens.iter().find(|attached| attached.id == id).map(|attached| &attached.screen)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut D::Screen> {
        self.screens.iter_mut().find(|attached| attached.id == id).map(|attached| &mut attached.screen)
    }

    pub fn index_for_screen(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|attached| attached.id == id)
    }

    pub fn index_for_view(&self, view: ViewId) -> Option<usize> {
        self.strip.index_for_view(view)
    }

    pub fn item_for_view(&self, view: ViewId) -> Option<&ItemOf<D>> {
        self.strip.item_for_view(view)
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The strip and the viewport are hidden while there are no tabs.
    pub fn is_strip_hidden(&self) -> bool {
        self.is_empty()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
        self.refresh_placeholder();
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Replace every tab and screen, then select the first tab.
    ///
    /// `tabs` and `screens` pair up by index; lengths that differ are
    /// rejected before anything changes.
    pub fn reload(&mut self, tabs: Vec<ItemOf<D>>, screens: Vec<D::Screen>) -> Result<()> {
        if tabs.len() != screens.len() {
            return Err(TabsError::MismatchedScreens { tabs: tabs.len(), screens: screens.len() });
        }
        debug!(count = tabs.len(), "reloading tabs");

        for mut old in std::mem::take(&mut self.screens) {
            self.delegate.will_disappear_screen(&mut old.screen);
            self.delegate.did_disappear_screen(&mut old.screen);
        }
        self.selected_screen = None;

        for screen in screens {
            let id = self.next_screen_id();
            self.screens.push(Attached { id, screen, shown_at: None });
        }
        self.viewport.offset = 0;
        self.refresh_placeholder();

        let selected = self.strip.reload(tabs, &mut Sizing(&mut self.delegate), &mut self.timeline);
        if let Some(selected) = selected {
            self.route_selection(selected);
        }
        Ok(())
    }

    /// Apply `transform` to every tab without rebuilding anything.
    pub fn reload_tabs(&mut self, transform: impl FnMut(&ItemOf<D>) -> ItemOf<D>) {
        self.strip.update_items(transform, &mut Sizing(&mut self.delegate));
    }

    /// Append a tab with its screen. The selection does not change.
    pub fn insert(&mut self, tab: ItemOf<D>, screen: D::Screen) -> ScreenId {
        let index = self.screens.len();
        self.attach_at(index, tab, screen)
    }

    /// Insert a tab with its screen at `index` (up to the current length).
    /// Returns `None` and fires nothing when `index` is out of range.
    pub fn insert_at(&mut self, index: usize, tab: ItemOf<D>, screen: D::Screen) -> Option<ScreenId> {
        if index > self.screens.len() {
            debug!(index, len = self.screens.len(), "insert ignored: index out of range");
            return None;
        }
        Some(self.attach_at(index, tab, screen))
    }

    /// Remove the tab and screen at `index`, returning the removed tab.
    pub fn remove_at(&mut self, index: usize) -> Option<ItemOf<D>> {
        let len = self.screens.len();
        if index >= len {
            debug!(index, len, "remove ignored: index out of range");
            return None;
        }

        let item = self.strip.items()[index].clone();
        self.delegate.will_remove_tab(&item);

        // The tab that slides into the removed slot, or the new last tab.
        let new_selected = index.min(len.saturating_sub(2));
        let mut removed = self.screens.remove(index);
        if let Some(selected) =
            self.strip.remove_item(index, new_selected, &mut Sizing(&mut self.delegate), &mut self.timeline)
        {
            self.route_selection(selected);
        }

        self.delegate.will_disappear_screen(&mut removed.screen);
        self.delegate.did_disappear_screen(&mut removed.screen);
        if self.selected_screen == Some(removed.id) {
            self.selected_screen = None;
        }
        debug!(index, screen = %removed.id, "screen detached");
        drop(removed);

        self.announce_shifted_screen(index);
        self.refresh_placeholder();
        self.delegate.did_remove_tab(&item);
        Some(item)
    }

    /// Remove the tab shown by `view`.
    pub fn remove_view(&mut self, view: ViewId) -> Option<ItemOf<D>> {
        let index = self.strip.index_for_view(view)?;
        self.remove_at(index)
    }

    /// Remove the first tab equal to `item`.
    pub fn remove_item(&mut self, item: &ItemOf<D>) -> Option<ItemOf<D>> {
        let index = self.strip.items().iter().position(|candidate| candidate == item)?;
        self.remove_at(index)
    }

    /// Remove the tab paired with screen `id`.
    pub fn remove_screen(&mut self, id: ScreenId) -> Option<ItemOf<D>> {
        let index = self.index_for_screen(id)?;
        self.remove_at(index)
    }

    /// Act on every removal requested by a tab view since the last call.
    /// Returns how many tabs were removed.
    pub fn process_removal_requests(&mut self) -> usize {
        self.strip
            .take_removal_requests()
            .into_iter()
            .filter(|view| self.remove_view(*view).is_some())
            .count()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select(&mut self, index: usize) -> bool {
        let selected = self.strip.select(index, &mut Sizing(&mut self.delegate), &mut self.timeline);
        self.route(selected)
    }

    /// A tap landed on `view`.
    pub fn tap(&mut self, view: ViewId) -> bool {
        let selected = self.strip.tap(view, &mut Sizing(&mut self.delegate), &mut self.timeline);
        self.route(selected)
    }

    pub fn select_next(&mut self) -> bool {
        let selected = self.strip.select_next(&mut Sizing(&mut self.delegate), &mut self.timeline);
        self.route(selected)
    }

    pub fn select_previous(&mut self) -> bool {
        let selected = self.strip.select_previous(&mut Sizing(&mut self.delegate), &mut self.timeline);
        self.route(selected)
    }

    // ------------------------------------------------------------------
    // Layout and time
    // ------------------------------------------------------------------

    /// The content viewport was resized.
    pub fn layout(&mut self, width: u16, height: u16) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.offset = self.settled_offset();
    }

    /// Frames of every screen, side by side in tab order.
    pub fn screen_frames(&self) -> Vec<ScreenFrame> {
        self.screens
            .iter()
            .enumerate()
            .map(|(index, attached)| ScreenFrame {
                screen: attached.id,
                x: index as u32 * self.viewport.width as u32,
                width: self.viewport.width,
                height: self.viewport.height,
            })
            .collect()
    }

    /// Horizontal offset of the viewport as it should be drawn right now.
    pub fn viewport_offset(&self) -> u32 {
        self.timeline.viewport_offset(self.viewport.offset)
    }

    /// Swap the appearance; every tab is re-pinned and re-sized.
    pub fn apply_appearance(&mut self, appearance: Appearance) {
        self.strip.apply_appearance(appearance, &mut Sizing(&mut self.delegate));
    }

    /// Scroll the strip by `delta` cells within `visible` cells.
    pub fn scroll_strip(&mut self, delta: i32, visible: u16) {
        self.strip.scroll_by(delta, visible);
    }

    pub fn scroll_strip_to_selected(&mut self, visible: u16) {
        self.strip.scroll_to_selected(visible);
    }

    /// Advance running transitions by `dt`, committing every selection
    /// whose transition finished. Returns how many were committed.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let finished = self.timeline.tick(dt);
        self.commit_all(finished)
    }

    /// Jump every running transition to its end.
    pub fn finish_transitions(&mut self) -> usize {
        let finished = self.timeline.finish_all();
        self.commit_all(finished)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn next_screen_id(&mut self) -> ScreenId {
        let id = ScreenId(self.next_screen);
        self.next_screen += 1;
        id
    }

    fn refresh_placeholder(&mut self) {
        self.placeholder_visible = self.placeholder.is_some() && self.screens.is_empty();
    }

    fn settled_offset(&self) -> u32 {
        self.strip.selected_index().map_or(0, |index| index as u32 * self.viewport.width as u32)
    }

    fn attach_at(&mut self, index: usize, tab: ItemOf<D>, mut screen: D::Screen) -> ScreenId {
        let id = self.next_screen_id();
        self.delegate.will_appear_screen(&mut screen);
        self.delegate.did_appear_screen(&mut screen);
        self.screens.insert(index, Attached { id, screen, shown_at: Some(index) });

        self.strip.insert_at(index, tab, &mut Sizing(&mut self.delegate));
        // Keep the selected screen in view if it was pushed right. A running
        // slide is redirected from wherever it currently is.
        let target = self.settled_offset();
        if target != self.viewport.offset {
            let from = self.viewport_offset();
            self.viewport.offset = target;
            if !self.timeline.is_idle() {
                self.timeline.animate(Transition::Viewport { from, to: target });
            }
        }
        self.refresh_placeholder();
        debug!(index, screen = %id, "screen attached");
        id
    }

    /// After a removal at `from`, give the first screen that now sits at a
    /// position it was never shown at a single appear pair.
    fn announce_shifted_screen(&mut self, from: usize) {
        let shifted = self
            .screens
            .iter()
            .enumerate()
            .skip(from)
            .find(|(index, attached)| attached.shown_at != Some(*index))
            .map(|(index, _)| index);

        if let Some(index) = shifted {
            let attached = &mut self.screens[index];
            // A routed selection already owes this screen its appear pair.
            if self.pending.iter().any(|pending| pending.next == attached.id) {
                return;
            }
            self.delegate.will_appear_screen(&mut attached.screen);
            self.delegate.did_appear_screen(&mut attached.screen);
            attached.shown_at = Some(index);
        }
    }

    fn route(&mut self, selected: Option<Selected<ItemOf<D>>>) -> bool {
        match selected {
            Some(selected) => {
                self.route_selection(selected);
                true
            }
            None => false,
        }
    }

    /// First half of a selection: notify, then slide the viewport. The
    /// second half runs in [`Self::commit`] once the slide finishes.
    fn route_selection(&mut self, selected: Selected<ItemOf<D>>) {
        let Some(next) = self.screens.get(selected.index).map(|attached| attached.id) else {
            warn!(index = selected.index, "selected tab has no screen");
            return;
        };
        let previous = self.selected_screen;

        self.delegate.will_show_tab(&selected.item);
        if let Some(previous) = previous.filter(|previous| *previous != next) {
            if let Some(attached) = self.screens.iter_mut().find(|attached| attached.id == previous) {
                self.delegate.will_disappear_screen(&mut attached.screen);
            }
        }
        if let Some(attached) = self.screens.get_mut(selected.index) {
            self.delegate.will_appear_screen(&mut attached.screen);
        }

        let from = self.viewport_offset();
        self.viewport.offset = self.settled_offset();
        let transition = self.timeline.animate(Transition::Viewport { from, to: self.viewport.offset });
        debug!(index = selected.index, screen = %next, "selection routed");
        self.pending.push(PendingSelection { transition, previous, next, item: selected.item });
    }

    fn commit_all(&mut self, finished: Vec<TransitionId>) -> usize {
        finished.into_iter().filter(|id| self.commit(*id)).count()
    }

    fn commit(&mut self, transition: TransitionId) -> bool {
        let Some(position) = self.pending.iter().position(|pending| pending.transition == transition) else {
            return false;
        };
        let pending = self.pending.remove(position);

        let Some(index) = self.index_for_screen(pending.next) else {
            warn!(screen = %pending.next, "selection finished for a screen that is gone");
            return false;
        };
        self.selected_screen = Some(pending.next);

        if let Some(previous) = pending.previous.filter(|previous| *previous != pending.next) {
            if let Some(attached) = self.screens.iter_mut().find(|attached| attached.id == previous) {
                self.delegate.did_disappear_screen(&mut attached.screen);
            }
        }
        let attached = &mut self.screens[index];
        self.delegate.did_appear_screen(&mut attached.screen);
        attached.shown_at = Some(index);
        self.delegate.did_show_tab(&pending.item);
        debug!(index, screen = %pending.next, "selection committed");
        true
    }
}
