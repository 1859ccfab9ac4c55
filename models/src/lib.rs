mod appearance;
mod item;

pub use appearance::{parse_color, Appearance};
pub use item::{Selectable, TabItem};
