//! Stderr logger for the generator and the CLI.
//!
//! Lines look like `[  0.012s  INFO ring] accepted 516 codewords`: elapsed
//! seconds since installation, the level, the last segment of the log target,
//! then the message. Install it once at startup with [`init_with_level`].

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// `coded_targets_ring::generator` -> `generator`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization; the first level wins.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Crates whose events the default tracing filter lets through at the
/// requested level. Everything else stays at `warn`.
#[cfg(feature = "tracing")]
const WORKSPACE_TARGETS: [&str; 4] = [
    "coded_targets",
    "coded_targets_core",
    "coded_targets_ring",
    "coded_targets_print",
];

#[cfg(feature = "tracing")]
fn default_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .fold(String::from("warn"), |acc, target| format!("{acc},{target}={level}"))
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the workspace crates log at `level`.
/// Span close events carry the wall time of catalog generation and sheet
/// rendering. `log` records are forwarded by the subscriber's bridge, so
/// do not combine this with [`init_with_level`].
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    // Stdout is reserved for code listings and catalog JSON.
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .compact()
            .finish()
            .try_init();
    }
}
