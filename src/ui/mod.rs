//! Terminal user interface.
//!
//! The UI is a passive renderer: it reads [`AppState`](crate::app::AppState)
//! through a computed view model and never mutates it.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready types and layout arithmetic
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: header, search box, status line, grid, overlay, footer
//! - [`helpers`]: cursor positioning, width-aware truncation, highlighting
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardView, FooterInfo, HeaderInfo, OverlayView, SearchBarInfo, StatusKind, StatusLine,
    UIViewModel,
};
