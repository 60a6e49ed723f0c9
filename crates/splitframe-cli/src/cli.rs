#![forbid(unsafe_code)]

//! Command-line argument parsing for the splitframe binary.
//!
//! Parses args by hand. Supports environment variable overrides via the
//! `SPLITFRAME_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use splitframe::{ContentType, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, ExportFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
splitframe: build a region layout and print it as JSON, HTML or React

USAGE:
    splitframe [OPTIONS]

OPTIONS:
    --format=FORMAT      Export format: json, html (default), react or jsx
    --width=PX           Canvas width in pixels (default: 1440, or the loaded layout's)
    --height=PX          Canvas height in pixels (default: 900, or the loaded layout's)
    --grid=RxC           Subdivide the main content region into an R x C grid
    --blank              Start from a single empty region instead of the starter layout
    --input=PATH         Load a layout from a JSON export instead of building one
    --component=NAME     Drop a component (button, input, nav, card, text, image)
                         onto the region at the canvas center
    --help, -h           Show this help message
    --version, -V        Show version

VIEWPORTS:
    Desktop    1440 x 900
    Tablet      768 x 1024
    Mobile      375 x 667

ENVIRONMENT VARIABLES:
    SPLITFRAME_FORMAT    Override --format
    SPLITFRAME_WIDTH     Override --width
    SPLITFRAME_HEIGHT    Override --height
    SPLITFRAME_GRID      Override --grid
    SPLITFRAME_LOG       Log filter written to stderr (default: warn)";

/// Rows and columns of a `--grid` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl FromStr for GridSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = s.split_once(['x', 'X']).ok_or(())?;
        let rows: usize = rows.trim().parse().map_err(|_| ())?;
        let cols: usize = cols.trim().parse().map_err(|_| ())?;
        if rows == 0 || cols == 0 {
            return Err(());
        }
        Ok(Self { rows, cols })
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Export format printed to stdout.
    pub format: ExportFormat,
    /// Canvas width in pixels, when set explicitly.
    pub width: Option<f64>,
    /// Canvas height in pixels, when set explicitly.
    pub height: Option<f64>,
    /// Grid to carve into the main content region.
    pub grid: Option<GridSize>,
    /// Skip the starter layout.
    pub blank: bool,
    /// JSON layout to load instead of building one.
    pub input: Option<PathBuf>,
    /// Component dropped at the canvas center.
    pub component: Option<ContentType>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            format: ExportFormat::Html,
            width: None,
            height: None,
            grid: None,
            blank: false,
            input: None,
            component: None,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

fn parse_extent(val: &str) -> Option<f64> {
    val.parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px > 0.0)
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Prints help or version and exits when asked to; exits with status 1
    /// on invalid arguments.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("splitframe {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit sources.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Unparseable environment values are
    /// ignored; unparseable flags are errors.
    pub fn parse_from<I, S>(
        args: I,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = var("SPLITFRAME_FORMAT")
            && let Ok(format) = val.parse::<ExportFormat>()
        {
            opts.format = format;
        }
        if let Some(val) = var("SPLITFRAME_WIDTH")
            && let Some(px) = parse_extent(&val)
        {
            opts.width = Some(px);
        }
        if let Some(val) = var("SPLITFRAME_HEIGHT")
            && let Some(px) = parse_extent(&val)
        {
            opts.height = Some(px);
        }
        if let Some(val) = var("SPLITFRAME_GRID")
            && let Ok(grid) = val.parse::<GridSize>()
        {
            opts.grid = Some(grid);
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--blank" => opts.blank = true,
                other => {
                    if let Some(val) = other.strip_prefix("--format=") {
                        opts.format = val
                            .parse::<ExportFormat>()
                            .map_err(|err| format!("Invalid --format value: {err}"))?;
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = Some(
                            parse_extent(val)
                                .ok_or_else(|| format!("Invalid --width value: {val}"))?,
                        );
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = Some(
                            parse_extent(val)
                                .ok_or_else(|| format!("Invalid --height value: {val}"))?,
                        );
                    } else if let Some(val) = other.strip_prefix("--grid=") {
                        let grid = val
                            .parse::<GridSize>()
                            .map_err(|()| format!("Invalid --grid value: {val} (expected RxC)"))?;
                        opts.grid = Some(grid);
                    } else if let Some(val) = other.strip_prefix("--input=") {
                        if val.is_empty() {
                            return Err("Invalid --input value: empty path".to_string());
                        }
                        opts.input = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--component=") {
                        let kind = ContentType::from(val.trim().to_ascii_lowercase());
                        if !kind.is_known() {
                            return Err(format!("Invalid --component value: {val}"));
                        }
                        opts.component = Some(kind);
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Canvas size for a freshly built layout.
    #[must_use]
    pub fn canvas(&self) -> (f64, f64) {
        (
            self.width.unwrap_or(DEFAULT_CANVAS_WIDTH),
            self.height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
        )
    }
}
