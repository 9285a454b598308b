//! Optional JSON trace output for debugging annotation runs.

use std::path::Path;

pub const TRACE_FILE: &str = "kanbun-trace.jsonl";

/// Keeps the background trace writer running. Pending events are flushed
/// when it is dropped, so hold it until the program is done.
#[must_use = "dropping the guard stops trace output"]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Write JSON trace events to `<log_dir>/kanbun-trace.jsonl`.
///
/// Filter with `RUST_LOG`; defaults to `kanbun_engine=debug`. Only the first
/// call installs a subscriber; later calls return an inert guard.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
    let (writer, worker) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kanbun_engine=debug")),
        )
        .try_init()
        .is_ok();

    TraceGuard {
        _worker: installed.then_some(worker),
    }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> TraceGuard {
    TraceGuard {}
}
