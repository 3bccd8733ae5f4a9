//! Tracing with file-based OTLP export.
//!
//! The plugin sandbox has no sockets for a collector, so spans travel
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK (simple processor) → FileSpanExporter → zpix-otlp.json
//! ```
//!
//! The file lives at `~/.local/share/zellij/zpix/zpix-otlp.json` on the host,
//! rotates at 10 MB and keeps three numbered backups. The filter comes from
//! the `trace_level` plugin option and accepts any `EnvFilter` directive
//! (`"debug"`, `"zpix::search=trace"`, ...).
//!
//! Requests carry their W3C trace context through the web request context map
//! (see [`crate::provider::RequestContext`]), so the span opened when a page is
//! requested can be reattached when the response arrives.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
