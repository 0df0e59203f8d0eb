//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns [`Action`]s and the plugin
//! runtime executes them: catalog requests go to the catalog client, notices
//! get an expiry timer, and `CloseFocus` hides the plugin pane.
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::{Action, Notice};
//! use cinefind::catalog::CatalogRequest;
//!
//! let actions = vec![
//!     Action::Fetch(CatalogRequest::search(1, "inception")),
//!     Action::Notify(Notice::validation()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::CatalogRequest;

/// Commands executed by the plugin runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request through the catalog client.
    ///
    /// The reply comes back later as [`crate::app::Event::CatalogReply`].
    Fetch(CatalogRequest),

    /// Shows a transient notice.
    ///
    /// The notice is already stored in the state when this action is emitted;
    /// the runtime only has to schedule its expiry.
    Notify(Notice),
}

/// Kind of transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The submitted query was empty; no request was made.
    Validation,
    /// A search finished with zero results.
    NoResults,
    /// Informational message from the runtime.
    Info,
}

/// A short-lived message shown in place of the footer hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    /// Notice for an empty or whitespace-only query.
    #[must_use]
    pub fn validation() -> Self {
        Self {
            kind: NoticeKind::Validation,
            text: "Please enter your search query.".to_string(),
        }
    }

    /// Notice for a search that returned nothing.
    #[must_use]
    pub fn no_results(query: &str) -> Self {
        Self {
            kind: NoticeKind::NoResults,
            text: format!("No movies found for \"{query}\"."),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
}
