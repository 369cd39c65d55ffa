#![forbid(unsafe_code)]

//! Command-line argument parsing for the pluck demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `PLUCK_DEMO_*` prefix; explicit flags win.

use std::env;
use std::process;

use pluck_core::PluckPath;
use pluck_runtime::config::env_flag;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
pluck-demo: watch a path inside a ticking feed

Emits {\"num\": {\"val\": TICK}} on an interval and prints the plucked value
each time it changes.

USAGE:
    pluck-demo [OPTIONS]

OPTIONS:
    --interval-ms=N      Delay between emissions in ms (default: 2000)
    --ticks=N            Number of emissions before exiting (default: 5)
    --path=PATH          Path to pluck, e.g. 'num.val' or 'items[0].name' (default: num.val)
    --no-memoize         Recompute the pluck on every check
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    PLUCK_DEMO_INTERVAL_MS   Override --interval-ms
    PLUCK_DEMO_TICKS         Override --ticks
    PLUCK_DEMO_PATH          Override --path
    PLUCK_DEMO_MEMOIZE       0/false/off to disable memoization
    PLUCK_LABEL              Adapter label in log output
    RUST_LOG                 Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Delay between emissions in milliseconds.
    pub interval_ms: u64,
    /// Number of emissions before exiting.
    pub ticks: u64,
    /// Path plucked out of every emission.
    pub path: PluckPath,
    /// Memoize the pluck between emissions.
    pub memoize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            ticks: 5,
            path: pluck_core::pluck_path!["num", "val"],
            memoize: true,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("pluck-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; unparseable values are ignored.
        if let Some(val) = get_env("PLUCK_DEMO_INTERVAL_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.interval_ms = n;
        }
        if let Some(val) = get_env("PLUCK_DEMO_TICKS")
            && let Ok(n) = val.trim().parse()
        {
            opts.ticks = n;
        }
        if let Some(val) = get_env("PLUCK_DEMO_PATH")
            && let Ok(path) = PluckPath::parse(val.trim())
        {
            opts.path = path;
        }
        if let Some(val) = get_env("PLUCK_DEMO_MEMOIZE") {
            opts.memoize = env_flag(&val);
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => {
                    return Err(ParseError::Help);
                }
                "--version" | "-V" => {
                    return Err(ParseError::Version);
                }
                "--no-memoize" => {
                    opts.memoize = false;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--interval-ms=") {
                        opts.interval_ms = parse_number("--interval-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--ticks=") {
                        opts.ticks = parse_number("--ticks", val)?;
                    } else if let Some(val) = other.strip_prefix("--path=") {
                        match PluckPath::parse(val) {
                            Ok(path) => opts.path = path,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--path",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}

fn parse_number(flag: &'static str, val: &str) -> Result<u64, ParseError> {
    val.parse().map_err(|_| ParseError::InvalidValue {
        flag,
        value: val.to_string(),
    })
}
