//! Tab strip and tab host controllers.
//!
//! [`TabStrip`] keeps tab items, their button views and the selection
//! pointer aligned. [`TabsController`] pairs every tab with a content screen
//! and fans lifecycle events out to a [`TabsDelegate`]. Rendering is left to
//! the host: views are plain [`TabView`] values, geometry is resolved from
//! [`Pins`], and motion is described by a [`Timeline`] the host ticks.

mod controller;
mod delegate;
mod error;
mod layout;
mod removal;
mod strip;
mod timeline;
mod view;

#[cfg(test)]
mod testing;

pub use controller::{ScreenFrame, ScreenId, TabsController};
pub use delegate::{ItemOf, StripDelegate, TabsDelegate};
pub use error::{Result, TabsError};
pub use layout::{Anchor, Frame, Pin, Pins, Span};
pub use removal::{RemovalHandle, RemovalQueue};
pub use strip::{Indicator, Selected, TabStrip};
pub use timeline::{DEFAULT_TRANSITION, Timeline, Transition, TransitionId, WidthChange, ease_in_out};
pub use view::{TabView, ViewId};
