//! Tracing subscriber setup for the `rbv` binary.
//!
//! Filter priority, highest first: `RBV_LOG`, `RUST_LOG`, then the
//! `-v`/`-q` flags (default `warn`).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "RBV_LOG";

/// Net verbosity: each `-v` raises the level one step, each `-q` lowers it.
/// Zero is the `warn` default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity(i16);

impl Verbosity {
    pub fn from_counts(verbose: u8, quiet: u8) -> Self {
        Self(i16::from(verbose) - i16::from(quiet))
    }

    /// Directive used when neither `RBV_LOG` nor `RUST_LOG` is set.
    pub fn directive(self) -> &'static str {
        match self.0 {
            i16::MIN..=-2 => "off",
            -1 => "error",
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Timestamps are only worth the noise once debugging is on.
    pub fn is_verbose(self) -> bool {
        self.0 > 0
    }
}

/// Upper bound on what may reach the terminal. The TUI owns the screen, so
/// without a log file only errors get through.
pub fn level_cap(interactive: bool, log_file: Option<&Path>) -> Option<LevelFilter> {
    (interactive && log_file.is_none()).then_some(LevelFilter::ERROR)
}

/// Installs the global subscriber. Call once, before loading configuration.
pub fn init_subscriber(
    verbosity: Verbosity,
    log_file: Option<&Path>,
    interactive: bool,
) -> std::io::Result<()> {
    let filter = build_env_filter(verbosity);
    let cap = level_cap(interactive, log_file);

    let (writer, use_ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (
            BoxMakeWriter::new(std::io::stderr),
            std::io::IsTerminal::is_terminal(&std::io::stderr()),
        ),
    };

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true);

    if verbosity.is_verbose() {
        tracing_subscriber::registry()
            .with(filter)
            .with(cap)
            .with(fmt_layer.with_timer(fmt::time::uptime()))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(cap)
            .with(fmt_layer.without_time().compact())
            .init();
    }

    Ok(())
}

/// `RBV_LOG` > `RUST_LOG` > CLI verbosity. Unparseable values fall through.
fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(verbosity.directive())
}
