use thiserror::Error;

/// Errors surfaced by the tab controllers.
///
/// Structural operations with a bad index are silent no-ops; only contract
/// violations and the explicit `try_*` accessors report an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabsError {
    #[error("{tabs} tab(s) were given with {screens} screen(s); every tab needs exactly one screen")]
    MismatchedScreens { tabs: usize, screens: usize },

    #[error("index {index} is out of range for {len} tab(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TabsError>;
