//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/cinefind/cinefind-otlp.json`, one
//! OTLP/JSON document per line, rotated by size. The `trace_level` plugin
//! option is an `EnvFilter` directive (default `info`).
//!
//! Catalog requests carry the trace context of the span that issued them
//! (see [`crate::catalog::TraceContext`]), so the reply handling shows up in
//! the same trace as the keystroke that caused it.
//!
//! # Modules
//!
//! - [`init`]: subscriber installation
//! - `exporter`: the `SpanExporter` and tracer provider
//! - `otlp`: span to OTLP/JSON encoding
//! - `rotating`: size-rotated line writer

mod exporter;
pub mod init;
mod otlp;
mod rotating;

pub use init::init_tracing;
