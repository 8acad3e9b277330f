//! Tracing setup for hosts embedding the resolver.
//!
//! Two kinds of output are worth switching on:
//!
//! - resolver diagnostics (`revelio_solver` at `debug`/`trace`): registration
//!   events and conflicting diamond bindings
//! - the query trace (`revelio::query_json` at `trace`): one start and one
//!   end event per resolver query, best read as JSON
//!
//! ```bash
//! REVELIO_LOG=revelio_solver=debug my-host
//! REVELIO_QUERY_TRACE=1 my-host              # query trace as JSON on stderr
//! REVELIO_LOG=debug REVELIO_LOG_FORMAT=tree my-host
//! ```
//!
//! Nothing is installed unless one of `REVELIO_LOG`, `REVELIO_QUERY_TRACE`
//! or `RUST_LOG` is set.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Filter directive selecting the resolver's query events.
pub const QUERY_TRACE_DIRECTIVE: &str = "revelio::query_json=trace";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines (default).
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `REVELIO_LOG_FORMAT` value; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// A filter plus an output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `RUST_LOG`-style directives.
    pub filter: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Only the query trace, as JSON.
    pub fn query_trace() -> Self {
        Self {
            filter: QUERY_TRACE_DIRECTIVE.to_string(),
            format: LogFormat::Json,
        }
    }

    /// Read `REVELIO_LOG` (falling back to `RUST_LOG`), `REVELIO_QUERY_TRACE`
    /// and `REVELIO_LOG_FORMAT`.
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable
    /// lookup.
    ///
    /// A set `REVELIO_QUERY_TRACE` adds [`QUERY_TRACE_DIRECTIVE`] to the
    /// filter and defaults the format to JSON.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let base = var("REVELIO_LOG").or_else(|| var("RUST_LOG"));
        let query_trace = var("REVELIO_QUERY_TRACE").is_some_and(|value| value != "0");

        let filter = match (base, query_trace) {
            (None, false) => return None,
            (Some(base), false) => base,
            (None, true) => QUERY_TRACE_DIRECTIVE.to_string(),
            (Some(base), true) => format!("{base},{QUERY_TRACE_DIRECTIVE}"),
        };
        let format = match var("REVELIO_LOG_FORMAT") {
            Some(value) => LogFormat::parse(&value),
            None if query_trace => LogFormat::Json,
            None => LogFormat::Text,
        };
        Some(Self { filter, format })
    }

    /// Build a subscriber writing to `writer`.
    pub fn subscriber<W>(&self, writer: W) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        let registry = Registry::default().with(filter);

        match self.format {
            LogFormat::Tree => Box::new(
                registry.with(
                    tracing_tree::HierarchicalLayer::default()
                        .with_indent_amount(2)
                        .with_indent_lines(true)
                        .with_targets(true)
                        .with_writer(writer),
                ),
            ),
            LogFormat::Json => Box::new(registry.with(fmt::layer().json().with_writer(writer))),
            LogFormat::Text => Box::new(registry.with(fmt::layer().with_writer(writer))),
        }
    }

    /// Install as the global subscriber, writing to stderr.
    pub fn init(&self) -> Result<(), TryInitError> {
        self.subscriber(std::io::stderr).try_init()
    }
}

/// Install the subscriber described by the environment.
///
/// Returns `Ok(false)` when the environment asks for no tracing, and an error
/// if a global subscriber is already installed.
pub fn init_tracing() -> Result<bool, TryInitError> {
    match TracingConfig::from_env() {
        Some(config) => config.init().map(|()| true),
        None => Ok(false),
    }
}
