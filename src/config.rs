//! Run configuration and command-line parsing.
//!
//! Options are layered: built-in defaults, then an optional JSON file given
//! with `--config`, then individual command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::construction::{Scan, Strategy};
use crate::error::{Error, Result};

/// Options controlling a tour-construction run.
///
/// # Examples
///
/// ```
/// use u_insertion::config::BuildOptions;
/// use u_insertion::construction::Strategy;
///
/// let opts: BuildOptions = serde_json::from_str(r#"{ "strategy": "farthest", "threads": 4 }"#).unwrap();
/// assert_eq!(opts.strategy, Strategy::Farthest);
/// assert_eq!(opts.threads, 4);
/// assert_eq!(opts.chunks, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Insertion heuristic.
    pub strategy: Strategy,
    /// Scan worker threads; `0` runs the scan on the calling thread.
    pub threads: usize,
    /// Chunks per parallel scan; `0` means one per worker.
    pub chunks: usize,
    /// Logging level.
    pub log_level: LogLevel,
    /// Logging line format.
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    pub log_timestamp: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Cheapest,
            threads: 0,
            chunks: 0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
        }
    }
}

impl BuildOptions {
    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Builds the selection scan these options describe.
    pub fn scan(&self) -> Result<Scan> {
        Scan::with_threads(self.threads, self.chunks)
    }

    fn apply(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "strategy" => self.strategy = required(name, value)?.parse()?,
            "threads" => self.threads = parse_usize(name, &required(name, value)?)?,
            "chunks" => self.chunks = parse_usize(name, &required(name, value)?)?,
            "log-level" => self.log_level = LogLevel::parse(&required(name, value)?)?,
            "log-format" => self.log_format = LogFormat::parse(&required(name, value)?)?,
            "log-timestamp" => {
                self.log_timestamp = match value.as_deref() {
                    None | Some("true") | Some("1") => true,
                    Some("false") | Some("0") => false,
                    Some(other) => {
                        return Err(Error::invalid_input(format!(
                            "invalid value for --log-timestamp: {other}"
                        )))
                    }
                }
            }
            other => {
                return Err(Error::invalid_input(format!(
                    "unknown option --{other}\n\n{}",
                    usage()
                )))
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            other => Err(Error::invalid_input(format!("invalid log level: {other}"))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(Error::invalid_input(format!("invalid log format: {other}"))),
        }
    }
}

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Optional JSON run report destination.
    pub report: Option<PathBuf>,
    pub options: BuildOptions,
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

impl CliArgs {
    /// Parses arguments (without the program name).
    ///
    /// Exactly two positional arguments are required: the coordinate file
    /// and the tour output file.
    pub fn parse_from_iter<I, S>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positional = Vec::new();
        let mut flags: Vec<(String, Option<String>)> = Vec::new();
        let mut config: Option<PathBuf> = None;
        let mut report: Option<PathBuf> = None;

        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            }
            if !arg.starts_with("--") {
                positional.push(arg);
                continue;
            }
            let raw_name = &arg[2..];
            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);
            if name == "config" {
                config = Some(PathBuf::from(required(&name, value)?));
            } else if name == "report" {
                report = Some(PathBuf::from(required(&name, value)?));
            } else {
                flags.push((name, value));
            }
        }

        let [input, output]: [String; 2] = positional.try_into().map_err(|p: Vec<String>| {
            Error::invalid_input(format!(
                "expected 2 positional arguments, got {}\n\n{}",
                p.len(),
                usage()
            ))
        })?;

        let mut options = match config {
            Some(path) => BuildOptions::from_json_file(&path)?,
            None => BuildOptions::default(),
        };
        for (name, value) in flags {
            options.apply(&name, value)?;
        }

        Ok(Command::Run(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            report,
            options,
        }))
    }
}

pub fn usage() -> &'static str {
    concat!(
        "Usage: u-insertion <coordinate_file_name> <output_file_name> [options]\n",
        "\n",
        "Options:\n",
        "  --strategy <cheapest|farthest>   Insertion heuristic (default: cheapest)\n",
        "  --threads <n>                    Parallel scan workers, 0 = sequential (default: 0)\n",
        "  --chunks <n>                     Chunks per parallel scan, 0 = one per worker\n",
        "  --config <path>                  JSON file with default options\n",
        "  --report <path>                  Write a JSON run report\n",
        "  --log-level <level>              error|warn|info|debug|trace|off (default: warn)\n",
        "  --log-format <compact|pretty>    Log line format (default: compact)\n",
        "  --log-timestamp[=<bool>]         Prefix log lines with a timestamp\n",
        "  -h, --help                       Show this message\n",
    )
}

/// Splits `name=value` or takes the value from the next argument when it
/// is not itself a flag.
fn split_arg<I>(raw_name: &str, args: &mut std::iter::Peekable<I>) -> (String, Option<String>)
where
    I: Iterator<Item = String>,
{
    if let Some((name, value)) = raw_name.split_once('=') {
        return (name.to_owned(), Some(value.to_owned()));
    }
    // Boolean flags never consume the following argument.
    if raw_name == "log-timestamp" {
        return (raw_name.to_owned(), None);
    }
    let value = args.next_if(|next| !next.starts_with("--"));
    (raw_name.to_owned(), value)
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("missing value for --{name}")))
}

fn parse_usize(name: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::invalid_input(format!("invalid value for --{name}: {value}")))
}
