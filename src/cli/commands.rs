//! Command implementations for the wxdecode CLI
//!
//! Reads report text from the command line, files or stdin, decodes every
//! report with the configured [`Decoder`], prints the results and logs a run
//! summary.

use crate::app::models::{DecodedReport, RawReport, ReportKind};
use crate::app::services::{Decoder, Formatter};
use crate::cli::args::{Commands, DecodeArgs};
use crate::config::{Config, OutputStyle};
use crate::{Error, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// Extension of report files picked up when walking a directory
const REPORT_FILE_EXTENSION: &str = "txt";

/// Statistics for the run summary
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Reports decoded
    pub reports_decoded: usize,
    /// Reports per kind, in METAR, TAF, DATIS order
    pub by_kind: [usize; 3],
    /// Tokens and sentences kept verbatim across all reports
    pub passthrough_items: usize,
    pub processing_time: Duration,
}

impl RunStats {
    fn record(&mut self, report: &DecodedReport) {
        self.reports_decoded += 1;
        self.passthrough_items += report.passthrough_count();
        let slot = match report.kind() {
            ReportKind::Metar => 0,
            ReportKind::Taf => 1,
            ReportKind::Datis => 2,
        };
        self.by_kind[slot] += 1;
    }
}

/// Run one decode subcommand
///
/// 1. Validate arguments and load layered configuration
/// 2. Set up logging
/// 3. Collect report texts and decode them
/// 4. Print the output and log the summary
pub fn run(command: Commands) -> Result<RunStats> {
    let start_time = Instant::now();
    let args = command.decode_args();

    args.validate()?;
    let config = load_configuration(args)?;
    setup_logging(args, &config)?;
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    let texts = collect_reports(args)?;
    info!("Decoding {} reports", texts.len());

    let decoder = Decoder::new(&config.decoder);
    let mut stats = RunStats::default();
    let reports: Vec<DecodedReport> = texts
        .into_iter()
        .map(|text| {
            let report = decoder.decode(&raw_report(command.kind(), text, args.station.as_deref()));
            stats.record(&report);
            report
        })
        .collect();

    println!("{}", render(&reports, &config)?);

    stats.processing_time = start_time.elapsed();
    info!(
        "Decoded {} reports ({} METAR, {} TAF, {} DATIS) in {:?}, {} items kept verbatim",
        stats.reports_decoded,
        stats.by_kind[0],
        stats.by_kind[1],
        stats.by_kind[2],
        stats.processing_time,
        stats.passthrough_items
    );
    Ok(stats)
}

fn raw_report(kind: Option<ReportKind>, text: String, station: Option<&str>) -> RawReport {
    let report = match kind {
        Some(kind) => RawReport::new(kind, text),
        None => RawReport::detect(text),
    };
    match station {
        Some(station) => report.with_station_hint(station),
        None => report,
    }
}

/// Render decoded reports in the configured output style
pub fn render(reports: &[DecodedReport], config: &Config) -> Result<String> {
    match config.output.format {
        OutputStyle::Json => serde_json::to_string_pretty(reports)
            .map_err(|e| Error::serialization("Failed to serialize decoded reports", e)),
        OutputStyle::Human => {
            let formatter = Formatter::with_color(config.output.color);
            Ok(reports
                .iter()
                .map(|report| formatter.format(report))
                .collect::<Vec<_>>()
                .join("\n\n"))
        }
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins; otherwise the level comes from `-v`/`-q`, then config.
fn setup_logging(args: &DecodeArgs, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args
        .get_log_level()
        .map(str::to_string)
        .unwrap_or_else(|| config.logging.level.to_lowercase());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wx_decoder={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then TOML file, then CLI overrides
fn load_configuration(args: &DecodeArgs) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &DecodeArgs) {
    if let Some(format) = args.output_format {
        config.output.format = format.into();
    }
    if args.no_color {
        config.output.color = false;
    }
    if let Some(level) = args.get_log_level() {
        config.logging.level = level.to_string();
    }
}

/// Report texts from TEXT, `--input`, or stdin, in that order of preference
pub fn collect_reports(args: &DecodeArgs) -> Result<Vec<String>> {
    let reports = if let Some(text) = args.inline_text() {
        split_reports(&text)
    } else if let Some(path) = &args.input_path {
        read_input_path(path)?
    } else {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::io("Failed to read reports from stdin", e))?;
        split_reports(&text)
    };

    if reports.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(reports)
}

/// Reports from a file, or from every report file under a directory
pub fn read_input_path(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::input_not_found(path));
    }
    if path.is_file() {
        return read_report_file(path);
    }

    let mut reports = Vec::new();
    for file in discover_report_files(path)? {
        reports.extend(read_report_file(&file)?);
    }
    Ok(reports)
}

/// `.txt` files under `dir`, sorted by path
pub fn discover_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::DirectoryTraversal {
            message: format!("Failed to walk {}", dir.display()),
            source: e,
        })?;
        let is_report = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_FILE_EXTENSION));
        if is_report {
            trace!("Found report file: {}", entry.path().display());
            files.push(entry.into_path());
        }
    }
    debug!("Found {} report files under {}", files.len(), dir.display());
    Ok(files)
}

fn read_report_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    Ok(split_reports(&content))
}

/// Split text into reports at blank lines
///
/// Lines within one report are joined with a space, so a METAR wrapped over
/// several lines stays one report.
pub fn split_reports(text: &str) -> Vec<String> {
    let mut reports = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                reports.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        reports.push(current.join(" "));
    }
    reports
}
