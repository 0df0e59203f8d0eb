//! Catalog client for The Movie Database.
//!
//! The orchestrator never performs I/O itself: it emits
//! [`CatalogRequest`]s, the plugin runtime hands them to a [`CatalogClient`],
//! and the host later delivers the HTTP reply, which [`decode_reply`] turns
//! into a [`CatalogReply`] event.
//!
//! # Architecture
//!
//! - `request`: request/reply types, sequencing tickets, trace context
//!   propagation through the host's request context map
//! - `client`: the [`CatalogClient`] trait, the [`Transport`] seam and the
//!   TMDB implementation
//! - `wire`: TMDB JSON payloads and reply decoding

pub mod client;
pub mod request;
pub mod wire;

pub use client::{CatalogClient, Credentials, HttpCall, TmdbCatalog, TmdbSettings, Transport};
pub use request::{CatalogReply, CatalogRequest, Lineage, Ticket, TraceContext};
pub use wire::decode_reply;
