//! Catalog request and reply types.
//!
//! Every request carries a [`Ticket`]: the lineage it belongs to and the
//! sequence number the orchestrator issued for it. Zellij hands the request
//! context map back verbatim with the HTTP reply, so the ticket (and the
//! distributed tracing context) travels through that map and the reply can be
//! matched against the orchestrator's counters without any bookkeeping on the
//! runtime side.

use crate::domain::{CatalogError, CinefindError, DetailRecord, MovieId, Result, ResultItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const KEY_LINEAGE: &str = "cinefind.lineage";
const KEY_SEQUENCE: &str = "cinefind.sequence";
const KEY_QUERY: &str = "cinefind.query";
const KEY_MOVIE_ID: &str = "cinefind.movie_id";
const KEY_TRACE_ID: &str = "cinefind.trace_id";
const KEY_PARENT_SPAN_ID: &str = "cinefind.parent_span_id";

/// Independent request lineages, each with its own sequence counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lineage {
    Search,
    Detail,
}

impl Lineage {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one issued request: its lineage and sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub lineage: Lineage,
    pub sequence: u64,
}

impl Ticket {
    #[must_use]
    pub const fn search(sequence: u64) -> Self {
        Self { lineage: Lineage::Search, sequence }
    }

    #[must_use]
    pub const fn detail(sequence: u64) -> Self {
        Self { lineage: Lineage::Detail, sequence }
    }
}

/// Distributed tracing context for linking reply handling to the dispatching span.
///
/// Captured when a request is built and restored when its reply is handled,
/// so both ends of one HTTP round trip land in the same trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the dispatching span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid, which is the case in unit tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Attaches this context as the remote parent of spans created while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }
}

/// A read the orchestrator wants the catalog to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogRequest {
    /// Look up movies matching a trimmed, non-empty query.
    Search {
        ticket: Ticket,
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the detail record of one movie.
    Detail {
        ticket: Ticket,
        id: MovieId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl CatalogRequest {
    /// Creates a search request with the current trace context.
    #[must_use]
    pub fn search(sequence: u64, query: impl Into<String>) -> Self {
        Self::Search {
            ticket: Ticket::search(sequence),
            query: query.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// Creates a detail request with the current trace context.
    #[must_use]
    pub fn detail(sequence: u64, id: MovieId) -> Self {
        Self::Detail {
            ticket: Ticket::detail(sequence),
            id,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Search { ticket, .. } | Self::Detail { ticket, .. } => *ticket,
        }
    }

    /// Builds the failed reply for a request that could not be dispatched.
    ///
    /// The orchestrator sees it exactly like a failure reported by the host.
    #[must_use]
    pub fn fail(&self, error: CatalogError) -> CatalogReply {
        match self {
            Self::Search { ticket, query, trace_context } => CatalogReply::Search {
                ticket: *ticket,
                query: query.clone(),
                outcome: Err(error),
                trace_context: trace_context.clone(),
            },
            Self::Detail { ticket, id, trace_context } => CatalogReply::Detail {
                ticket: *ticket,
                id: *id,
                outcome: Err(error),
                trace_context: trace_context.clone(),
            },
        }
    }

    /// Encodes the request identity into a host request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        let ticket = self.ticket();
        context.insert(KEY_LINEAGE.to_string(), ticket.lineage.to_string());
        context.insert(KEY_SEQUENCE.to_string(), ticket.sequence.to_string());

        let trace_context = match self {
            Self::Search { query, trace_context, .. } => {
                context.insert(KEY_QUERY.to_string(), query.clone());
                trace_context
            }
            Self::Detail { id, trace_context, .. } => {
                context.insert(KEY_MOVIE_ID.to_string(), id.to_string());
                trace_context
            }
        };

        if let Some(trace) = trace_context {
            context.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }

        context
    }

    /// Restores a request from a host request context map.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Encode`] when the map was not produced by
    /// [`CatalogRequest::to_context`].
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let field = |key: &str| {
            context
                .get(key)
                .ok_or_else(|| CinefindError::Encode(format!("request context is missing `{key}`")))
        };

        let sequence: u64 = field(KEY_SEQUENCE)?
            .parse()
            .map_err(|e| CinefindError::Encode(format!("invalid sequence number: {e}")))?;

        let trace_context = match (context.get(KEY_TRACE_ID), context.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        match field(KEY_LINEAGE)?.as_str() {
            "search" => Ok(Self::Search {
                ticket: Ticket::search(sequence),
                query: field(KEY_QUERY)?.clone(),
                trace_context,
            }),
            "detail" => Ok(Self::Detail {
                ticket: Ticket::detail(sequence),
                id: field(KEY_MOVIE_ID)?
                    .parse()
                    .map_err(|e| CinefindError::Encode(format!("invalid movie id: {e}")))?,
                trace_context,
            }),
            other => Err(CinefindError::Encode(format!("unknown request lineage `{other}`"))),
        }
    }
}

/// The settled outcome of a [`CatalogRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogReply {
    Search {
        ticket: Ticket,
        query: String,
        outcome: std::result::Result<Vec<ResultItem>, CatalogError>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    Detail {
        ticket: Ticket,
        id: MovieId,
        outcome: std::result::Result<DetailRecord, CatalogError>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl CatalogReply {
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Search { ticket, .. } | Self::Detail { ticket, .. } => *ticket,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Search { trace_context, .. } | Self::Detail { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trip_keeps_ticket_and_query() {
        let request = CatalogRequest::Search {
            ticket: Ticket::search(7),
            query: "the thing".to_string(),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let restored = CatalogRequest::from_context(&request.to_context()).unwrap();
        assert_eq!(restored, request);
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut context = BTreeMap::new();
        context.insert("other.plugin".to_string(), "1".to_string());
        assert!(matches!(
            CatalogRequest::from_context(&context),
            Err(CinefindError::Encode(_))
        ));

        let mut bad_lineage = CatalogRequest::detail(3, MovieId(42)).to_context();
        bad_lineage.insert(KEY_LINEAGE.to_string(), "poster".to_string());
        assert!(CatalogRequest::from_context(&bad_lineage).is_err());
    }

    #[test]
    fn failed_dispatch_keeps_request_identity() {
        let request = CatalogRequest::detail(4, MovieId(550));
        let reply = request.fail(CatalogError::Network("offline".to_string()));
        assert_eq!(reply.ticket(), Ticket::detail(4));
        assert!(matches!(
            reply,
            CatalogReply::Detail { id: MovieId(550), outcome: Err(CatalogError::Network(_)), .. }
        ));
    }

    #[test]
    fn trace_context_is_absent_without_an_otel_layer() {
        assert!(TraceContext::from_current().is_none());
    }
}
