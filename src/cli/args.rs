//! Command-line argument definitions for wxdecode
//!
//! One subcommand per report kind plus `auto`, which detects the kind from
//! the text. All subcommands share the same input, output and logging options.

use crate::app::models::ReportKind;
use crate::config::OutputStyle;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static STATION_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]{3}$").expect("valid station regex"));

/// CLI arguments for the aviation weather decoder
///
/// Decodes METAR, TAF and DATIS text into readable sections or JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wxdecode",
    version,
    about = "Decode METAR, TAF and DATIS aviation weather text",
    long_about = "Decodes raw aviation weather reports into structured records. METAR and TAF \
                  groups are decoded token by token, DATIS broadcasts are searched for weather, \
                  operations, closures, notices and advisories. Anything that cannot be decoded \
                  is shown verbatim."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode METAR/SPECI observations
    Metar(DecodeArgs),
    /// Decode terminal aerodrome forecasts
    Taf(DecodeArgs),
    /// Decode DATIS broadcasts
    Datis(DecodeArgs),
    /// Detect each report's kind, then decode it
    Auto(DecodeArgs),
}

impl Commands {
    /// Report kind forced by the subcommand; `None` for `auto`
    pub fn kind(&self) -> Option<ReportKind> {
        match self {
            Commands::Metar(_) => Some(ReportKind::Metar),
            Commands::Taf(_) => Some(ReportKind::Taf),
            Commands::Datis(_) => Some(ReportKind::Datis),
            Commands::Auto(_) => None,
        }
    }

    pub fn decode_args(&self) -> &DecodeArgs {
        match self {
            Commands::Metar(args)
            | Commands::Taf(args)
            | Commands::Datis(args)
            | Commands::Auto(args) => args,
        }
    }
}

/// Arguments shared by every decode subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct DecodeArgs {
    /// Report text; words are joined with single spaces
    ///
    /// When neither TEXT nor --input is given, reports are read from stdin.
    /// Options go before TEXT so that groups like `-RA` stay part of it.
    #[arg(
        value_name = "TEXT",
        conflicts_with = "input_path",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub text: Vec<String>,

    /// File or directory of reports
    ///
    /// Reports in a file are separated by blank lines. A directory is walked
    /// recursively and every `.txt` file in it is read.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "File or directory of reports separated by blank lines"
    )]
    pub input_path: Option<PathBuf>,

    /// Station for DATIS text that does not start with an identifier
    #[arg(
        short = 's',
        long = "station",
        value_name = "ICAO",
        help = "Station identifier for DATIS text without one"
    )]
    pub station: Option<String>,

    /// Output format; defaults to the configured format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        help = "Output format for decoded reports"
    )]
    pub output_format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// TOML configuration file for decoder settings. If not specified,
    /// looks for <config dir>/wxdecode/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Disable colored section headings
    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format for decoded reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections
    Human,
    /// JSON array of decoded records
    Json,
}

impl From<OutputFormat> for OutputStyle {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputStyle::Human,
            OutputFormat::Json => OutputStyle::Json,
        }
    }
}

impl DecodeArgs {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::input_not_found(input_path));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(station) = &self.station {
            if !STATION_ARG_RE.is_match(station) {
                return Err(Error::configuration(format!(
                    "Station must be a four-character identifier, got '{}'",
                    station
                )));
            }
        }

        Ok(())
    }

    /// Log level chosen by flags, if any
    ///
    /// `None` leaves the configured level in place.
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Report text given on the command line, if any
    pub fn inline_text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Commands {
        Args::try_parse_from(argv).unwrap().command.unwrap()
    }

    #[test]
    fn test_subcommand_kinds() {
        assert_eq!(parse(&["wxdecode", "metar", "KSFO"]).kind(), Some(ReportKind::Metar));
        assert_eq!(parse(&["wxdecode", "taf", "TAF"]).kind(), Some(ReportKind::Taf));
        assert_eq!(parse(&["wxdecode", "datis", "INFO"]).kind(), Some(ReportKind::Datis));
        assert_eq!(parse(&["wxdecode", "auto", "KSFO"]).kind(), None);
    }

    #[test]
    fn test_text_words_are_joined() {
        let command = parse(&["wxdecode", "metar", "KSFO", "151756Z", "29012KT"]);
        assert_eq!(
            command.decode_args().inline_text().as_deref(),
            Some("KSFO 151756Z 29012KT")
        );

        let command = parse(&["wxdecode", "metar"]);
        assert!(command.decode_args().inline_text().is_none());
    }

    #[test]
    fn test_hyphenated_groups_stay_in_text() {
        let command = parse(&["wxdecode", "metar", "KSFO", "-RA", "BR"]);
        assert_eq!(
            command.decode_args().inline_text().as_deref(),
            Some("KSFO -RA BR")
        );
    }

    #[test]
    fn test_options() {
        let command = parse(&[
            "wxdecode", "datis", "--station", "KLAX", "--format", "json", "--no-color", "-vv",
            "INFO", "Q",
        ]);
        let args = command.decode_args();
        assert_eq!(args.station.as_deref(), Some("KLAX"));
        assert_eq!(args.output_format, Some(OutputFormat::Json));
        assert!(args.no_color);
        assert_eq!(args.get_log_level(), Some("debug"));
    }

    #[test]
    fn test_text_conflicts_with_input() {
        assert!(Args::try_parse_from(["wxdecode", "metar", "-i", "reports.txt", "KSFO"]).is_err());
        assert!(Args::try_parse_from(["wxdecode", "metar", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = DecodeArgs::default();
        assert_eq!(args.get_log_level(), None);

        args.verbose = 1;
        assert_eq!(args.get_log_level(), Some("info"));
        args.verbose = 5;
        assert_eq!(args.get_log_level(), Some("trace"));

        args.quiet = true;
        assert_eq!(args.get_log_level(), Some("error"));
    }

    #[test]
    fn test_validation() {
        assert!(DecodeArgs::default().validate().is_ok());

        let args = DecodeArgs {
            station: Some("LAX".to_string()),
            ..DecodeArgs::default()
        };
        assert!(args.validate().is_err());

        let args = DecodeArgs {
            input_path: Some(PathBuf::from("/definitely/not/here.txt")),
            ..DecodeArgs::default()
        };
        assert!(matches!(args.validate(), Err(Error::InputNotFound { .. })));
    }
}
