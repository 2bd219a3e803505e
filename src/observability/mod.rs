//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces go to `~/.local/share/zellij/galleria/galleria-otlp.json`, rotating
//! at 10MB with three numbered backups. Each line is a complete OTLP JSON
//! export request.
//!
//! Search fetches complete asynchronously through Zellij events, so the
//! dispatching span's identity is carried in the web request context map
//! (see [`TraceContext`]) and re-attached when the response arrives.
//!
//! # Configuration
//!
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` plugin option
//! 3. Default: `"info"`

mod file_writer;
mod init;
mod otlp;
mod propagation;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
pub use propagation::TraceContext;
