//! Logging setup for the command-line tools.
//!
//! Structured logging goes to stderr with a configurable format (pretty,
//! compact, JSON) so that command output on stdout stays clean.

mod tracing_init;

pub use tracing_init::*;
