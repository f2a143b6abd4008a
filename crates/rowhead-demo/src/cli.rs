#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `ROWHEAD_DEMO_*` prefix; explicit flags win over the environment.

use std::env;
use std::process;

use rowhead_text::WrapMode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
rowhead demo: an editor with a line-number gutter

USAGE:
    rowhead-demo [OPTIONS]

OPTIONS:
    --width=N          Window width in device units (default: 500)
    --height=N         Window height in device units (default: 500)
    --seed=N           Seed for the sample text (default: 15)
    --wrap=MODE        Wrap mode: word (default), char or none
    --caret=N          Put the caret at offset N before the first frame
    --appends=N        Words appended by the background writer (default: 40)
    --words=PATH       Word list (default: /usr/share/dict/words)
    --log=FILTER       Log filter, e.g. 'rowhead_gutter=debug' (default: warn)
    --help, -h         Show this help message
    --version, -V      Show version

ENVIRONMENT VARIABLES:
    ROWHEAD_DEMO_WIDTH      Override --width
    ROWHEAD_DEMO_HEIGHT     Override --height
    ROWHEAD_DEMO_SEED       Override --seed
    ROWHEAD_DEMO_WRAP       Override --wrap
    ROWHEAD_DEMO_APPENDS    Override --appends
    ROWHEAD_DEMO_LOG        Override --log
    ROWHEAD_GUTTER_*        Gutter appearance (see rowhead-gutter)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub wrap: WrapMode,
    pub caret: Option<usize>,
    /// Words the background writer appends.
    pub appends: usize,
    pub words_path: String,
    pub log_filter: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            seed: 15,
            wrap: WrapMode::Word,
            caret: None,
            appends: 40,
            words_path: "/usr/share/dict/words".into(),
            log_filter: "warn".into(),
        }
    }
}

/// Outcome of parsing that is not a set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Help,
    Version,
    Invalid(String),
}

fn parse_wrap(value: &str) -> Option<WrapMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "word" => Some(WrapMode::Word),
        "char" => Some(WrapMode::Char),
        "none" | "off" => Some(WrapMode::None),
        _ => None,
    }
}

fn invalid(flag: &str, value: &str) -> Exit {
    Exit::Invalid(format!("Invalid {flag} value: {value}"))
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version` or invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(Exit::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(Exit::Version) => {
                println!("rowhead-demo {VERSION}");
                process::exit(0);
            }
            Err(Exit::Invalid(message)) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `get_env`.
    ///
    /// Unparseable environment values are ignored; unparseable flags are an
    /// error.
    pub fn parse_from<F>(args: &[String], get_env: F) -> Result<Self, Exit>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = get_env("ROWHEAD_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = n;
        }
        if let Some(val) = get_env("ROWHEAD_DEMO_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.height = n;
        }
        if let Some(val) = get_env("ROWHEAD_DEMO_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = n;
        }
        if let Some(val) = get_env("ROWHEAD_DEMO_WRAP")
            && let Some(mode) = parse_wrap(&val)
        {
            opts.wrap = mode;
        }
        if let Some(val) = get_env("ROWHEAD_DEMO_APPENDS")
            && let Ok(n) = val.parse()
        {
            opts.appends = n;
        }
        if let Some(val) = get_env("ROWHEAD_DEMO_LOG") {
            opts.log_filter = val;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Err(Exit::Help),
                "--version" | "-V" => return Err(Exit::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = val.parse().map_err(|_| invalid("--width", val))?;
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = val.parse().map_err(|_| invalid("--height", val))?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = val.parse().map_err(|_| invalid("--seed", val))?;
                    } else if let Some(val) = other.strip_prefix("--wrap=") {
                        opts.wrap = parse_wrap(val).ok_or_else(|| invalid("--wrap", val))?;
                    } else if let Some(val) = other.strip_prefix("--caret=") {
                        opts.caret = Some(val.parse().map_err(|_| invalid("--caret", val))?);
                    } else if let Some(val) = other.strip_prefix("--appends=") {
                        opts.appends = val.parse().map_err(|_| invalid("--appends", val))?;
                    } else if let Some(val) = other.strip_prefix("--words=") {
                        opts.words_path = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log_filter = val.to_string();
                    } else {
                        return Err(Exit::Invalid(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        if opts.width == 0 || opts.height == 0 {
            return Err(Exit::Invalid("window size must be non-zero".into()));
        }
        Ok(opts)
    }
}
