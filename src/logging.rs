//! Logger setup for the command-line binary.
//!
//! The library only emits through the `log` facade; installing a backend is
//! left to the caller.

use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target, WriteStyle};
use log::{Level, Record};

use crate::config::{BuildOptions, LogFormat};
use crate::error::{Error, Result};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Installs an `env_logger` backend writing to stderr.
///
/// `compact` lines are `LEVEL message`. `pretty` lines add the emitting
/// module relative to this crate, e.g. `DEBUG construction::builder | ...`.
///
/// Fails if a global logger is already installed.
pub fn init_logger(options: &BuildOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record: &Record<'_>| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            let tag = level_tag(record.level());
            match log_format {
                LogFormat::Compact => writeln!(buf, "{tag} {}", record.args()),
                LogFormat::Pretty => writeln!(
                    buf,
                    "{tag:<5} {} | {}",
                    module_label(record.target()),
                    record.args()
                ),
            }
        })
        .try_init()
        .map_err(|e| Error::invalid_input(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Module path relative to this crate; the binary and foreign crates keep
/// their full target.
fn module_label(target: &str) -> &str {
    match target.strip_prefix(CRATE_TARGET) {
        Some("") => "main",
        Some(rest) => rest.strip_prefix("::").unwrap_or(target),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn test_module_label() {
        assert_eq!(module_label("u_insertion::construction::builder"), "construction::builder");
        assert_eq!(module_label("u_insertion::io::reader"), "io::reader");
        assert_eq!(module_label("u_insertion"), "main");
        assert_eq!(module_label("rayon_core::registry"), "rayon_core::registry");
        assert_eq!(module_label("u_insertion_extra::x"), "u_insertion_extra::x");
    }
}
