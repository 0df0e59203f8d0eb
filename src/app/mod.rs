//! Application layer: the search orchestrator.
//!
//! Sits between the plugin runtime (main.rs) and the catalog and UI layers.
//! All state changes go through [`handle_event`]; side effects come back out
//! as [`Action`]s for the runtime to execute.
//!
//! ```text
//! Keys / callbacks → Event → handle_event → AppState → Actions → catalog client
//!                              ↑                                       ↓
//!                              └──────────── CatalogReply ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler, and notices
//! - [`handler`]: event processing
//! - [`modes`]: input focus and grid directions
//! - [`present`]: view model computation
//! - [`state`]: orchestrator state, sequencing and display phases
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::{handle_event, Action, AppState, Event};
//! use cinefind::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::QuerySubmitted("alien".into()))?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), cinefind::CinefindError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod present;
pub mod state;

pub use actions::{Action, Notice, NoticeKind};
pub use handler::{handle_event, Event};
pub use modes::{Direction, InputMode};
pub use state::{AppState, Completion, DisplayPhase, ErrorBanner, ErrorOrigin};
