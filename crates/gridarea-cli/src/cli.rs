#![forbid(unsafe_code)]

//! Command-line argument parsing for the `gridarea` binary.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `GRIDAREA_*` prefix.

use std::env;
use std::process;

use gridarea_core::geometry::Size;
use gridarea_core::logging::LogFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
gridarea - resolve grid-template-area layouts

USAGE:
    gridarea [OPTIONS] [FILE]

Reads a template from FILE (or stdin when FILE is absent or '-'), one row
per line. Blank lines and lines starting with '#' are ignored.

OPTIONS:
    --strict             Reject areas that are not rectangles
    --json               Print the report as JSON
    --add-row=NAME       Append a full-width row (repeatable)
    --size=WxH           Also solve rectangles for a WxH container
    --log-format=FMT     Log format on stderr: 'text' or 'json' (default: text)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    GRIDAREA_OUTPUT          'text' or 'json'
    GRIDAREA_SIZE            Default for --size
    GRIDAREA_LOG_FORMAT      Default for --log-format
    GRIDAREA_STRICT          Reject non-rectangular areas (1/true)
    GRIDAREA_EXPAND_WEIGHT   Weight of occupied tracks (default: 1)
    GRIDAREA_FALLBACK_LIMIT  Highest fallback suffix (default: 99)
    GRIDAREA_MIN_ROW_HEIGHT  Minimum row height for --size (default: 1)
    GRIDAREA_MIN_COL_WIDTH   Minimum column width for --size (default: 1)
    GRIDAREA_ROW_GAP         Gap between rows for --size (default: 0)
    GRIDAREA_COL_GAP         Gap between columns for --size (default: 0)
    RUST_LOG                 Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Template path; `None` reads stdin.
    pub input: Option<String>,
    /// Force the strict area policy.
    pub strict: bool,
    pub json: bool,
    /// Rows appended after the template, in order.
    pub add_rows: Vec<String>,
    pub size: Option<Size>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            input: None,
            strict: false,
            json: false,
            add_rows: Vec::new(),
            size: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Exits on `--help`, `--version` and
    /// usage errors.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("gridarea {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(2);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    pub(crate) fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("GRIDAREA_OUTPUT") {
            opts.json = val.trim().eq_ignore_ascii_case("json");
        }
        if let Some(val) = get_env("GRIDAREA_SIZE")
            && let Some(size) = Size::parse(&val)
        {
            opts.size = Some(size);
        }
        if let Some(val) = get_env("GRIDAREA_LOG_FORMAT")
            && let Some(format) = LogFormat::parse(&val)
        {
            opts.log_format = format;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--strict" => opts.strict = true,
                "--json" => opts.json = true,
                "-" => opts.input = None,
                _ => {
                    if let Some(val) = arg.strip_prefix("--add-row=") {
                        if val.is_empty() || val.contains(char::is_whitespace) {
                            return Err(ParseError::InvalidValue {
                                flag: "--add-row",
                                value: val.to_owned(),
                            });
                        }
                        opts.add_rows.push(val.to_owned());
                    } else if let Some(val) = arg.strip_prefix("--size=") {
                        opts.size = Some(Size::parse(val).ok_or_else(|| ParseError::InvalidValue {
                            flag: "--size",
                            value: val.to_owned(),
                        })?);
                    } else if let Some(val) = arg.strip_prefix("--log-format=") {
                        opts.log_format =
                            LogFormat::parse(val).ok_or_else(|| ParseError::InvalidValue {
                                flag: "--log-format",
                                value: val.to_owned(),
                            })?;
                    } else if arg.starts_with('-') || opts.input.is_some() {
                        return Err(ParseError::UnknownArg(arg.to_owned()));
                    } else {
                        opts.input = Some(arg.to_owned());
                    }
                }
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], vars: &[(&str, &str)]) -> Result<Opts, ParseError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Opts::parse_from_env_and_args(args.iter().copied(), |key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[], &[]).unwrap(), Opts::default());
    }

    #[test]
    fn flags_and_file() {
        let opts = parse(
            &[
                "--strict",
                "--json",
                "--add-row=footer",
                "--add-row=status",
                "--size=80x24",
                "layout.grid",
            ],
            &[],
        )
        .unwrap();
        assert!(opts.strict);
        assert!(opts.json);
        assert_eq!(opts.add_rows, vec!["footer", "status"]);
        assert_eq!(opts.size, Some(Size::new(80, 24)));
        assert_eq!(opts.input.as_deref(), Some("layout.grid"));
    }

    #[test]
    fn env_defaults_are_overridden_by_flags() {
        let vars = [
            ("GRIDAREA_OUTPUT", "json"),
            ("GRIDAREA_SIZE", "10x5"),
            ("GRIDAREA_LOG_FORMAT", "json"),
        ];
        let opts = parse(&[], &vars).unwrap();
        assert!(opts.json);
        assert_eq!(opts.size, Some(Size::new(10, 5)));
        assert_eq!(opts.log_format, LogFormat::Json);

        let opts = parse(&["--size=20x8", "--log-format=text"], &vars).unwrap();
        assert_eq!(opts.size, Some(Size::new(20, 8)));
        assert_eq!(opts.log_format, LogFormat::Text);
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let opts = parse(&[], &[("GRIDAREA_SIZE", "huge")]).unwrap();
        assert_eq!(opts.size, None);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["-h"], &[]), Err(ParseError::Help));
        assert_eq!(parse(&["--version"], &[]), Err(ParseError::Version));
    }

    #[test]
    fn usage_errors() {
        assert_eq!(
            parse(&["--size=wide"], &[]),
            Err(ParseError::InvalidValue {
                flag: "--size",
                value: "wide".into(),
            })
        );
        assert_eq!(
            parse(&["--add-row=two words"], &[]),
            Err(ParseError::InvalidValue {
                flag: "--add-row",
                value: "two words".into(),
            })
        );
        assert_eq!(
            parse(&["--frobnicate"], &[]),
            Err(ParseError::UnknownArg("--frobnicate".into()))
        );
        assert_eq!(
            parse(&["a.grid", "b.grid"], &[]),
            Err(ParseError::UnknownArg("b.grid".into()))
        );
    }
}
