use models::{Appearance, Selectable};
use tracing::{debug, trace};

use crate::delegate::StripDelegate;
use crate::error::{Result, TabsError};
use crate::layout::{self, Frame, Pin, Pins, Span};
use crate::removal::RemovalQueue;
use crate::timeline::{Timeline, Transition, WidthChange};
use crate::view::{TabView, ViewId};

/// A selection the strip just made, for its owner to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selected<I> {
    pub index: usize,
    pub item: I,
}

/// Where the selection indicator is pinned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicator {
    pub anchor: ViewId,
    pub width: u16,
}

struct Slot<V> {
    id: ViewId,
    view: V,
    pins: Pins,
}

/// Visual changes collected while a selection is being applied.
#[derive(Default)]
struct Batch {
    widths: Vec<WidthChange>,
    indicator_from: Option<Span>,
}

impl Batch {
    fn is_empty(&self) -> bool {
        self.widths.is_empty() && self.indicator_from.is_none()
    }
}

/// Horizontally scrollable row of tab buttons.
///
/// Owns the ordered items, one view per item at the same index, and the
/// selection pointer. Every mutator keeps items and views aligned before
/// it returns.
pub struct TabStrip<V: TabView> {
    appearance: Appearance,
    items: Vec<V::Item>,
    slots: Vec<Slot<V>>,
    selected: Option<usize>,
    indicator: Option<Indicator>,
    removals: RemovalQueue,
    next_view: u64,
    scroll: u16,
}

impl<V: TabView> TabStrip<V> {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            appearance,
            items: Vec::new(),
            slots: Vec::new(),
            selected: None,
            indicator: None,
            removals: RemovalQueue::new(),
            next_view: 0,
            scroll: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn items(&self) -> &[V::Item] {
        &self.items
    }

    pub fn views(&self) -> impl Iterator<Item = &V> {
        self.slots.iter().map(|slot| &slot.view)
    }

    pub fn view_ids(&self) -> Vec<ViewId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&V::Item> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn indicator(&self) -> Option<Indicator> {
        self.indicator
    }

    pub fn try_item(&self, index: usize) -> Result<&V::Item> {
        self.items
            .get(index)
            .ok_or(TabsError::IndexOutOfRange { index, len: self.items.len() })
    }

    pub fn pins(&self, view: ViewId) -> Option<Pins> {
        self.slots.iter().find(|slot| slot.id == view).map(|slot| slot.pins)
    }

    /// Removal requests raised by views since the last call.
    pub fn take_removal_requests(&self) -> Vec<ViewId> {
        self.removals.drain()
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn index_for_view(&self, view: ViewId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == view)
    }

    pub fn item_for_view(&self, view: ViewId) -> Option<&V::Item> {
        self.index_for_view(view).map(|index| &self.items[index])
    }

    /// First view whose item equals `item`, selection flag included.
    pub fn view_for_item(&self, item: &V::Item) -> Option<&V> {
        self.items
            .iter()
            .position(|candidate| candidate == item)
            .map(|index| &self.slots[index].view)
    }

    pub fn view(&self, view: ViewId) -> Option<&V> {
        self.slots.iter().find(|slot| slot.id == view).map(|slot| &slot.view)
    }

    pub fn view_mut(&mut self, view: ViewId) -> Option<&mut V> {
        self.slots.iter_mut().find(|slot| slot.id == view).map(|slot| &mut slot.view)
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Replace every tab, then select the first one.
    pub fn reload(
        &mut self,
        items: Vec<V::Item>,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        debug!(count = items.len(), "reloading tab strip");
        self.slots.clear();
        self.selected = None;
        self.indicator = None;
        self.scroll = 0;
        self.items = items;

        for index in 0..self.items.len() {
            self.items[index].set_selected(false);
            let slot = self.build_slot(index, delegate);
            self.slots.push(slot);
        }

        self.select(0, delegate, timeline)
    }

    /// Append a tab; the selection is left alone.
    pub fn insert(&mut self, item: V::Item, delegate: &mut impl StripDelegate<V>) -> ViewId {
        let index = self.items.len();
        self.insert_unchecked(index, item, delegate)
    }

    /// Insert a tab at `index`, which may equal the current length. Returns
    /// `None` and changes nothing when `index` is past the end.
    pub fn insert_at(
        &mut self,
        index: usize,
        item: V::Item,
        delegate: &mut impl StripDelegate<V>,
    ) -> Option<ViewId> {
        if index > self.items.len() {
            debug!(index, len = self.items.len(), "insert ignored: index out of range");
            return None;
        }
        Some(self.insert_unchecked(index, item, delegate))
    }

    fn insert_unchecked(
        &mut self,
        index: usize,
        mut item: V::Item,
        delegate: &mut impl StripDelegate<V>,
    ) -> ViewId {
        item.set_selected(false);
        self.items.insert(index, item);
        let slot = self.build_slot(index, delegate);
        let id = slot.id;
        self.slots.insert(index, slot);

        // The previous occupant now trails the new view.
        if let Some(next) = self.slots.get_mut(index + 1) {
            next.pins.leading = Pin::after(id, self.appearance.inner_spacing);
        }

        if let Some(selected) = self.selected {
            if index <= selected {
                self.selected = Some(selected + 1);
            }
        }

        debug!(index, %id, len = self.items.len(), "tab inserted");
        id
    }

    /// Remove the tab at `index`, then select `new_selected`.
    ///
    /// Out-of-range indices are ignored. Removing the last remaining tab
    /// leaves the strip empty and unselected.
    pub fn remove_item(
        &mut self,
        index: usize,
        new_selected: usize,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "remove ignored: index out of range");
            return None;
        }

        let batch = Batch { indicator_from: self.indicator_span(), ..Batch::default() };
        // The old selection survives only if it was not the removed tab,
        // and is re-pointed past the gap.
        self.selected = self
            .selected
            .take()
            .filter(|previous| *previous != index)
            .map(|previous| if previous > index { previous - 1 } else { previous });

        self.items.remove(index);
        let removed = self.slots.remove(index);
        if index < self.slots.len() {
            self.slots[index].pins.leading = self.leading_pin(index);
        }
        if self.indicator.is_some_and(|indicator| indicator.anchor == removed.id) {
            self.indicator = None;
        }
        debug!(index, view = %removed.id, len = self.items.len(), "tab removed");
        drop(removed);

        if new_selected < self.items.len() {
            return self.apply_selection(new_selected, batch, delegate, timeline);
        }

        let mut batch = batch;
        if let Some(previous) = self.selected.take() {
            self.deselect(previous, delegate, &mut batch);
            batch.indicator_from = None;
            self.run(batch, timeline);
        }
        self.indicator = None;
        self.clamp_scroll(None);
        None
    }

    /// Select the tab at `index`. Out-of-range indices are ignored.
    pub fn select(
        &mut self,
        index: usize,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        if index >= self.items.len() {
            return None;
        }
        let batch = Batch { indicator_from: self.indicator_span(), ..Batch::default() };
        self.apply_selection(index, batch, delegate, timeline)
    }

    /// Select whichever tab shows `view`, as a tap on it would.
    pub fn tap(
        &mut self,
        view: ViewId,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        let index = self.index_for_view(view)?;
        self.select(index, delegate, timeline)
    }

    pub fn select_next(
        &mut self,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        if self.items.is_empty() {
            return None;
        }
        let next = self.selected.map_or(0, |index| (index + 1) % self.items.len());
        self.select(next, delegate, timeline)
    }

    pub fn select_previous(
        &mut self,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let previous = self.selected.map_or(0, |index| if index == 0 { len - 1 } else { index - 1 });
        self.select(previous, delegate, timeline)
    }

    /// Rewrite every item in place and re-render the views.
    ///
    /// The selection flag of each result is forced to match the selection
    /// pointer, so a transform cannot select a second tab.
    pub fn update_items(
        &mut self,
        mut transform: impl FnMut(&V::Item) -> V::Item,
        delegate: &mut impl StripDelegate<V>,
    ) {
        for index in 0..self.items.len() {
            let mut item = transform(&self.items[index]);
            let selected = self.selected == Some(index);
            item.set_selected(selected);

            let width = Self::query_width(delegate, &item);
            let slot = &mut self.slots[index];
            if selected {
                slot.view.render_selected(&item);
            } else {
                slot.view.render_unselected(&item);
            }
            slot.pins.width = width;
            if selected {
                if let Some(indicator) = self.indicator.as_mut() {
                    indicator.width = width;
                }
            }
            self.items[index] = item;
        }
    }

    /// Swap the appearance and re-pin every view against it.
    pub fn apply_appearance(&mut self, appearance: Appearance, delegate: &mut impl StripDelegate<V>) {
        self.appearance = appearance;
        for index in 0..self.slots.len() {
            let leading = self.leading_pin(index);
            let width = Self::query_width(delegate, &self.items[index]);
            let slot = &mut self.slots[index];
            slot.pins = Pins { leading, width, height: self.appearance.strip_height };
        }
        self.indicator = match self.selected {
            Some(index) if self.appearance.indicator_visible => {
                let slot = &self.slots[index];
                Some(Indicator { anchor: slot.id, width: slot.pins.width })
            }
            _ => None,
        };
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Settled frames of every view, relative to the content origin.
    pub fn layout(&self) -> Vec<Frame> {
        layout::resolve(self.slots.iter().map(|slot| (slot.id, slot.pins)))
    }

    /// Frames as they should be drawn right now, mid-transition included.
    pub fn frames(&self, timeline: &Timeline) -> Vec<Frame> {
        layout::resolve(self.slots.iter().map(|slot| {
            let mut pins = slot.pins;
            pins.width = timeline.width_of(slot.id, pins.width);
            (slot.id, pins)
        }))
    }

    /// Where to draw the selection indicator right now.
    pub fn indicator_frame(&self, timeline: &Timeline) -> Option<Span> {
        let indicator = self.indicator?;
        let frame = self.frames(timeline).into_iter().find(|frame| frame.view == indicator.anchor)?;
        Some(timeline.indicator_span(frame.into()))
    }

    /// Total length of the settled chain of tabs.
    pub fn content_width(&self) -> u16 {
        self.layout().last().map_or(0, Frame::right)
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll
    }

    /// Scroll the strip by `delta` cells within a window `visible` wide.
    pub fn scroll_by(&mut self, delta: i32, visible: u16) {
        let max = self.content_width().saturating_sub(visible) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }

    /// Scroll just enough for the selected tab to be fully visible.
    pub fn scroll_to_selected(&mut self, visible: u16) {
        self.clamp_scroll(Some(visible));
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Keep the scroll offset inside the content, and the selected tab in
    /// view when the visible width is known.
    fn clamp_scroll(&mut self, visible: Option<u16>) {
        let layout = self.layout();
        let content = layout.last().map_or(0, Frame::right);
        let Some(visible) = visible else {
            self.scroll = self.scroll.min(content);
            return;
        };
        if let Some(frame) = self.selected.and_then(|index| layout.get(index)) {
            if frame.x < self.scroll {
                self.scroll = frame.x;
            } else if frame.right() > self.scroll.saturating_add(visible) {
                self.scroll = frame.right() - visible;
            }
        }
        self.scroll = self.scroll.min(content.saturating_sub(visible));
    }

    /// Leading pin for the view sitting at `index` in the slot list.
    fn leading_pin(&self, index: usize) -> Pin {
        match index.checked_sub(1).and_then(|previous| self.slots.get(previous)) {
            Some(previous) => Pin::after(previous.id, self.appearance.inner_spacing),
            None => Pin::leading(),
        }
    }

    fn query_width(delegate: &mut impl StripDelegate<V>, item: &V::Item) -> u16 {
        let width = delegate.width_for_item(item);
        trace!(width, selected = item.is_selected(), "width queried");
        width
    }

    /// Build and pin the view for the item already stored at `index`.
    fn build_slot(&mut self, index: usize, delegate: &mut impl StripDelegate<V>) -> Slot<V> {
        let id = ViewId(self.next_view);
        self.next_view += 1;

        let item = &self.items[index];
        let mut view = V::default();
        view.bind(self.removals.handle_for(id));
        view.configure(item);
        delegate.will_display_view(&mut view, item);

        let leading = self.leading_pin(index);
        let width = Self::query_width(delegate, item);
        Slot { id, view, pins: Pins { leading, width, height: self.appearance.strip_height } }
    }

    fn indicator_span(&self) -> Option<Span> {
        let indicator = self.indicator?;
        self.layout().into_iter().find(|frame| frame.view == indicator.anchor).map(Span::from)
    }

    fn deselect(&mut self, index: usize, delegate: &mut impl StripDelegate<V>, batch: &mut Batch) {
        self.items[index].set_selected(false);
        self.restyle(index, delegate, batch);
    }

    /// Re-render the view at `index` from its item and re-query its width.
    fn restyle(&mut self, index: usize, delegate: &mut impl StripDelegate<V>, batch: &mut Batch) {
        let item = &self.items[index];
        let width = Self::query_width(delegate, item);
        let slot = &mut self.slots[index];
        slot.view.render(item);
        batch.widths.push(WidthChange { view: slot.id, from: slot.pins.width, to: width });
        slot.pins.width = width;
    }

    fn apply_selection(
        &mut self,
        index: usize,
        mut batch: Batch,
        delegate: &mut impl StripDelegate<V>,
        timeline: &mut Timeline,
    ) -> Option<Selected<V::Item>> {
        if let Some(previous) = self.selected {
            if previous != index {
                self.deselect(previous, delegate, &mut batch);
            }
        }

        self.items[index].set_selected(true);
        self.restyle(index, delegate, &mut batch);
        self.selected = Some(index);

        if self.appearance.indicator_visible {
            let slot = &self.slots[index];
            self.indicator = Some(Indicator { anchor: slot.id, width: slot.pins.width });
        }

        let selected = Selected { index, item: self.items[index].clone() };
        debug!(index, "tab selected");
        self.run(batch, timeline);
        self.clamp_scroll(None);
        Some(selected)
    }

    fn run(&self, batch: Batch, timeline: &mut Timeline) {
        if batch.is_empty() {
            return;
        }
        timeline.animate(Transition::Strip { widths: batch.widths, indicator_from: batch.indicator_from });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Anchor;
    use crate::testing::{Recorder, RecordingView, tabs};
    use models::TabItem;
    use std::time::Duration;

    type Strip = TabStrip<RecordingView>;

    fn loaded(labels: &[&str]) -> (Strip, Recorder, Timeline) {
        let mut strip = Strip::new(Appearance::default());
        let mut recorder = Recorder::default();
        let mut timeline = Timeline::new();
        strip.reload(tabs(labels), &mut recorder, &mut timeline);
        (strip, recorder, timeline)
    }

    fn selected_flags(strip: &Strip) -> Vec<bool> {
        strip.items().iter().map(|item| item.is_selected).collect()
    }

    fn labels(strip: &Strip) -> Vec<&str> {
        strip.items().iter().map(|item| item.label.as_str()).collect()
    }

    fn assert_aligned(strip: &Strip) {
        assert_eq!(strip.items().len(), strip.views().count());
        for (item, view) in strip.items().iter().zip(strip.views()) {
            assert_eq!(view.shown.as_ref(), Some(&(item.label.clone(), item.is_selected)));
        }
    }

    fn assert_chained(strip: &Strip) {
        let ids = strip.view_ids();
        for (index, id) in ids.iter().enumerate() {
            let pins = strip.pins(*id).unwrap();
            match index {
                0 => assert_eq!(pins.leading, Pin::leading()),
                _ => assert_eq!(pins.leading.anchor, Anchor::TrailingOf(ids[index - 1])),
            }
        }
    }

    #[test]
    fn reload_builds_one_view_per_item_and_selects_first() {
        let (strip, recorder, _) = loaded(&["a", "b", "c"]);

        assert_eq!(strip.len(), 3);
        assert_eq!(strip.selected_index(), Some(0));
        assert_eq!(selected_flags(&strip), vec![true, false, false]);
        assert_aligned(&strip);
        assert_chained(&strip);
        assert_eq!(recorder.count("will_display"), 3);
    }

    #[test]
    fn reload_with_nothing_leaves_strip_unselected() {
        let (strip, _, timeline) = loaded(&[]);
        assert!(strip.is_empty());
        assert_eq!(strip.selected_index(), None);
        assert!(timeline.is_idle());
    }

    #[test]
    fn reload_resets_selection_and_stale_flags() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);
        strip.select(2, &mut recorder, &mut timeline);

        let mut incoming = tabs(&["x", "y"]);
        incoming[1].is_selected = true;
        let selected = strip.reload(incoming, &mut recorder, &mut timeline);

        assert_eq!(selected.map(|s| s.index), Some(0));
        assert_eq!(selected_flags(&strip), vec![true, false]);
    }

    #[test]
    fn reload_twice_is_idempotent() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b"]);
        let first = (labels(&strip).join(","), strip.selected_index(), strip.layout().len());
        strip.reload(tabs(&["a", "b"]), &mut recorder, &mut timeline);
        let second = (labels(&strip).join(","), strip.selected_index(), strip.layout().len());
        assert_eq!(first, second);
        assert_aligned(&strip);
    }

    #[test]
    fn widths_come_from_the_delegate() {
        let (strip, _, _) = loaded(&["abc", "de"]);
        let widths: Vec<u16> = strip.layout().iter().map(|f| f.width).collect();
        // Recorder sizes a tab as its label length, plus two when selected.
        assert_eq!(widths, vec![5, 2]);

        let xs: Vec<u16> = strip.layout().iter().map(|f| f.x).collect();
        assert_eq!(xs, vec![0, 6]);
        assert_eq!(strip.content_width(), 8);
    }

    #[test]
    fn selecting_flips_exactly_two_flags_and_requeries_width() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);
        let before = recorder.width_queries;

        let selected = strip.select(2, &mut recorder, &mut timeline);

        assert_eq!(selected, Some(Selected { index: 2, item: TabItem { label: "c".into(), is_selected: true } }));
        assert_eq!(selected_flags(&strip), vec![false, false, true]);
        assert_eq!(recorder.width_queries - before, 2);
        assert_aligned(&strip);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a"]);
        timeline.finish_all();
        assert_eq!(strip.select(5, &mut recorder, &mut timeline), None);
        assert_eq!(strip.selected_index(), Some(0));
        assert!(timeline.is_idle());
    }

    #[test]
    fn selection_change_is_one_batched_transition() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["aa", "bb"]);
        timeline.finish_all();

        strip.select(1, &mut recorder, &mut timeline);
        let frames = strip.frames(&timeline);
        // Nothing has moved yet: old widths are still drawn.
        assert_eq!(frames[0].width, 4);
        assert_eq!(frames[1].width, 2);

        assert_eq!(timeline.tick(Duration::from_secs(1)).len(), 1);
        let frames = strip.frames(&timeline);
        assert_eq!(frames[0].width, 2);
        assert_eq!(frames[1].width, 4);
    }

    #[test]
    fn append_keeps_selection_and_extends_chain() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b"]);
        strip.select(1, &mut recorder, &mut timeline);

        strip.insert(TabItem::new("c"), &mut recorder);

        assert_eq!(labels(&strip), vec!["a", "b", "c"]);
        assert_eq!(strip.selected_index(), Some(1));
        assert_eq!(selected_flags(&strip), vec![false, true, false]);
        assert_aligned(&strip);
        assert_chained(&strip);
    }

    #[test]
    fn insert_at_relinks_both_neighbours() {
        let (mut strip, mut recorder, _) = loaded(&["a", "c"]);
        let before = strip.view_ids();

        let id = strip.insert_at(1, TabItem::new("b"), &mut recorder).unwrap();

        assert_eq!(labels(&strip), vec!["a", "b", "c"]);
        assert_eq!(strip.pins(id).unwrap().leading, Pin::after(before[0], 1));
        assert_eq!(strip.pins(before[1]).unwrap().leading, Pin::after(id, 1));
        assert_chained(&strip);
    }

    #[test]
    fn insert_at_front_becomes_leading_and_shifts_selection() {
        let (mut strip, mut recorder, _) = loaded(&["a", "b"]);

        strip.insert_at(0, TabItem::new("z"), &mut recorder);

        assert_eq!(labels(&strip), vec!["z", "a", "b"]);
        assert_eq!(strip.selected_index(), Some(1));
        assert_eq!(strip.selected_item().map(|i| i.label.as_str()), Some("a"));
        assert_chained(&strip);
    }

    #[test]
    fn insert_past_end_is_ignored() {
        let (mut strip, mut recorder, _) = loaded(&["a"]);
        assert_eq!(strip.insert_at(3, TabItem::new("b"), &mut recorder), None);
        assert_eq!(strip.len(), 1);
        assert_eq!(recorder.count("will_display"), 1);
    }

    #[test]
    fn inserted_items_never_arrive_selected() {
        let (mut strip, mut recorder, _) = loaded(&["a"]);
        let mut item = TabItem::new("b");
        item.is_selected = true;
        strip.insert(item, &mut recorder);
        assert_eq!(selected_flags(&strip), vec![true, false]);
    }

    #[test]
    fn removing_front_relinks_new_first_view() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);
        let ids = strip.view_ids();

        strip.remove_item(0, 0, &mut recorder, &mut timeline);

        assert_eq!(labels(&strip), vec!["b", "c"]);
        assert_eq!(strip.pins(ids[1]).unwrap().leading, Pin::leading());
        assert_chained(&strip);
        assert_aligned(&strip);
    }

    #[test]
    fn removing_middle_bridges_the_gap() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);
        let ids = strip.view_ids();

        strip.remove_item(1, 1, &mut recorder, &mut timeline);

        assert_eq!(strip.pins(ids[2]).unwrap().leading, Pin::after(ids[0], 1));
        assert_eq!(strip.view_ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn removal_clears_old_selection_before_reselecting() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);

        let selected = strip.remove_item(2, 1, &mut recorder, &mut timeline);

        assert_eq!(selected.map(|s| s.index), Some(1));
        assert_eq!(selected_flags(&strip), vec![false, true]);
        assert_aligned(&strip);
    }

    #[test]
    fn removing_last_tab_empties_the_strip() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["only"]);

        assert_eq!(strip.remove_item(0, 0, &mut recorder, &mut timeline), None);
        assert!(strip.is_empty());
        assert_eq!(strip.selected_index(), None);
        assert_eq!(strip.content_width(), 0);
    }

    #[test]
    fn remove_out_of_range_changes_nothing() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b"]);
        assert_eq!(strip.remove_item(2, 0, &mut recorder, &mut timeline), None);
        assert_eq!(strip.len(), 2);
        assert_eq!(strip.selected_index(), Some(0));
    }

    #[test]
    fn update_items_relabels_without_touching_views() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b"]);
        strip.select(1, &mut recorder, &mut timeline);
        let ids = strip.view_ids();

        strip.update_items(|item| {
            let mut next = item.relabeled(item.label.to_uppercase());
            next.is_selected = true;
            next
        }, &mut recorder);

        assert_eq!(strip.view_ids(), ids);
        assert_eq!(labels(&strip), vec!["A", "B"]);
        assert_eq!(selected_flags(&strip), vec![false, true]);
        assert_aligned(&strip);
    }

    #[test]
    fn lookups_report_absence() {
        let (strip, _, _) = loaded(&["a", "b"]);
        let ids = strip.view_ids();

        assert_eq!(strip.index_for_view(ids[1]), Some(1));
        assert_eq!(strip.item_for_view(ids[1]).map(|i| i.label.as_str()), Some("b"));
        assert_eq!(strip.index_for_view(ViewId(999)), None);

        // Value lookup includes the selection flag.
        assert!(strip.view_for_item(&TabItem::new("a")).is_none());
        assert!(strip.view_for_item(&TabItem::new("b")).is_some());
        assert!(matches!(strip.try_item(9), Err(TabsError::IndexOutOfRange { index: 9, len: 2 })));
    }

    #[test]
    fn tap_and_keyboard_navigation_select() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["a", "b", "c"]);
        let ids = strip.view_ids();

        strip.tap(ids[2], &mut recorder, &mut timeline);
        assert_eq!(strip.selected_index(), Some(2));
        strip.select_next(&mut recorder, &mut timeline);
        assert_eq!(strip.selected_index(), Some(0));
        strip.select_previous(&mut recorder, &mut timeline);
        assert_eq!(strip.selected_index(), Some(2));
        assert_eq!(strip.tap(ViewId(999), &mut recorder, &mut timeline), None);
    }

    #[test]
    fn indicator_follows_selection() {
        let appearance = Appearance { indicator_visible: true, ..Appearance::default() };
        let mut strip = Strip::new(appearance);
        let mut recorder = Recorder::default();
        let mut timeline = Timeline::new();
        strip.reload(tabs(&["aa", "b"]), &mut recorder, &mut timeline);
        timeline.finish_all();
        let ids = strip.view_ids();

        assert_eq!(strip.indicator(), Some(Indicator { anchor: ids[0], width: 4 }));

        strip.select(1, &mut recorder, &mut timeline);
        assert_eq!(strip.indicator(), Some(Indicator { anchor: ids[1], width: 3 }));
        // Mid-flight the bar still starts where it was.
        assert_eq!(strip.indicator_frame(&timeline), Some(Span { x: 0, width: 4 }));

        timeline.finish_all();
        assert_eq!(strip.indicator_frame(&timeline), Some(Span { x: 3, width: 3 }));
    }

    #[test]
    fn removal_handles_feed_the_queue() {
        let (strip, _, _) = loaded(&["a", "b"]);
        let ids = strip.view_ids();

        let handle = strip.view(ids[1]).and_then(|view| view.handle.clone()).unwrap();
        assert!(handle.request_removal());
        assert_eq!(strip.take_removal_requests(), vec![ids[1]]);
    }

    #[test]
    fn closure_can_size_a_standalone_strip() {
        let mut strip = Strip::new(Appearance::default().with_spacing(0, 0, 2));
        let mut timeline = Timeline::new();
        let mut sizing = |_: &TabItem| 3u16;

        strip.reload(tabs(&["a", "b"]), &mut sizing, &mut timeline);
        assert_eq!(strip.content_width(), 8);
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let (mut strip, mut recorder, mut timeline) = loaded(&["aaaa", "bbbb", "cccc"]);
        // widths 6, 4, 4 with 1 cell gaps: content is 16 wide.
        strip.scroll_by(100, 10);
        assert_eq!(strip.scroll_offset(), 6);
        strip.scroll_by(-100, 10);
        assert_eq!(strip.scroll_offset(), 0);

        strip.select(2, &mut recorder, &mut timeline);
        strip.scroll_to_selected(8);
        let selected = strip.layout()[2];
        assert!(selected.x >= strip.scroll_offset());
        assert!(selected.right() <= strip.scroll_offset() + 8);
    }

    #[test]
    fn apply_appearance_repins_everything() {
        let (mut strip, mut recorder, _) = loaded(&["a", "b"]);
        strip.apply_appearance(Appearance::default().with_strip_height(5).with_spacing(0, 0, 3), &mut recorder);

        let layout = strip.layout();
        assert_eq!(layout[1].x, layout[0].right() + 3);
        assert!(layout.iter().all(|frame| frame.height == 5));
        assert_eq!(strip.indicator(), None);
    }
}
