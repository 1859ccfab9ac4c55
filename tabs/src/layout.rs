use std::collections::HashMap;

use tracing::warn;

use crate::view::ViewId;

/// What a view's leading edge is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// The leading edge of the strip's scrollable content.
    StripLeading,
    /// The trailing edge of another view.
    TrailingOf(ViewId),
}

/// "Pin my leading edge to `anchor`, `constant` cells further right."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub anchor: Anchor,
    pub constant: u16,
}

impl Pin {
    /// Pin for the first view in the chain.
    pub fn leading() -> Self {
        Self { anchor: Anchor::StripLeading, constant: 0 }
    }

    /// Pin following `previous` with `spacing` cells in between.
    pub fn after(previous: ViewId, spacing: u16) -> Self {
        Self { anchor: Anchor::TrailingOf(previous), constant: spacing }
    }
}

/// Full set of layout relationships held for one view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pins {
    pub leading: Pin,
    pub width: u16,
    pub height: u16,
}

/// Resolved geometry of one view, relative to the strip content origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub view: ViewId,
    pub x: u16,
    pub width: u16,
    pub height: u16,
}

impl Frame {
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn contains_x(&self, x: u16) -> bool {
        x >= self.x && x < self.right()
    }
}

/// Horizontal extent of something laid out along the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub width: u16,
}

impl From<Frame> for Span {
    fn from(frame: Frame) -> Self {
        Self { x: frame.x, width: frame.width }
    }
}

/// Resolve a chain of pinned views into frames, in the given order.
///
/// Anchors must point at views that appear earlier in the chain. A dangling
/// anchor is resolved against the strip's leading edge.
pub fn resolve<I>(chain: I) -> Vec<Frame>
where
    I: IntoIterator<Item = (ViewId, Pins)>,
{
    let mut trailing: HashMap<ViewId, u16> = HashMap::new();
    let mut frames = Vec::new();

    for (view, pins) in chain {
        let origin = match pins.leading.anchor {
            Anchor::StripLeading => 0,
            Anchor::TrailingOf(other) => match trailing.get(&other) {
                Some(&edge) => edge,
                None => {
                    warn!(%view, anchor = %other, "view pinned to an unknown anchor");
                    0
                }
            },
        };
        let frame = Frame {
            view,
            x: origin.saturating_add(pins.leading.constant),
            width: pins.width,
            height: pins.height,
        };
        trailing.insert(view, frame.right());
        frames.push(frame);
    }

    frames
}
