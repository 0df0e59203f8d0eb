//! Domain layer for the cinefind plugin.
//!
//! Catalog value types and error definitions, independent of Zellij APIs and
//! of the TMDB wire format.
//!
//! # Organization
//!
//! - [`error`]: Crate and catalog error types, result alias
//! - [`movie`]: Result summaries and detail records

pub mod error;
pub mod movie;

pub use error::{CatalogError, CinefindError, Result};
pub use movie::{DetailRecord, MovieId, PosterRef, ReleaseYear, ResultItem};
