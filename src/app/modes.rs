//! Input focus state.
//!
//! The plugin has two focus targets: the search box and the result grid. The
//! detail overlay is not a mode of its own; it is open whenever a detail is
//! loaded or pending, and it captures input until dismissed.
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::modes::{Direction, InputMode};
//!
//! let mode = InputMode::Typing;
//! assert_ne!(mode, InputMode::Browsing);
//! let _ = Direction::Left;
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys edit the search box; `Enter` submits the query.
    Typing,

    /// Keys move the cursor across the result grid; `Enter` opens the detail
    /// overlay for the card under the cursor.
    Browsing,
}

/// Cursor movement within the result grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
