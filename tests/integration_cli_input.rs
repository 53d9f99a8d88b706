//! Integration tests for reading report files and rendering batches

use std::fs;
use tempfile::TempDir;
use wx_decoder::cli::args::{DecodeArgs, OutputFormat};
use wx_decoder::cli::commands::{
    apply_cli_overrides, collect_reports, discover_report_files, read_input_path, render,
};
use wx_decoder::config::OutputStyle;
use wx_decoder::{Config, Error, RawReport, decode};

const METAR_FILE: &str = "\
METAR KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996
  RMK AO2 SLP145

SPECI KOAK 151802Z 30010KT 8SM BKN012 15/11 A2995
";

const TAF_FILE: &str = "\
TAF KLAX 151130Z 1512/1618 28015KT P6SM SKC
  TEMPO 1515/1518 BKN020
";

fn write_reports(dir: &TempDir) {
    fs::write(dir.path().join("metars.txt"), METAR_FILE).unwrap();
    fs::create_dir(dir.path().join("forecasts")).unwrap();
    fs::write(dir.path().join("forecasts").join("klax.TXT"), TAF_FILE).unwrap();
    fs::write(dir.path().join("notes.md"), "not a report").unwrap();
}

#[test]
fn test_discover_report_files() {
    let dir = TempDir::new().unwrap();
    write_reports(&dir);

    let files = discover_report_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["klax.TXT", "metars.txt"]);
}

#[test]
fn test_read_directory_of_reports() {
    let dir = TempDir::new().unwrap();
    write_reports(&dir);

    let reports = read_input_path(dir.path()).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports[0],
        "TAF KLAX 151130Z 1512/1618 28015KT P6SM SKC TEMPO 1515/1518 BKN020"
    );
    assert!(reports[1].ends_with("A2996 RMK AO2 SLP145"));
    assert!(reports[2].starts_with("SPECI KOAK"));
}

#[test]
fn test_read_single_file_and_missing_path() {
    let dir = TempDir::new().unwrap();
    write_reports(&dir);

    let reports = read_input_path(&dir.path().join("metars.txt")).unwrap();
    assert_eq!(reports.len(), 2);

    let missing = dir.path().join("missing.txt");
    assert!(matches!(
        read_input_path(&missing),
        Err(Error::InputNotFound { .. })
    ));
}

#[test]
fn test_collect_reports_prefers_inline_text() {
    let args = DecodeArgs {
        text: vec!["KSFO".into(), "151756Z".into(), "-RA".into()],
        ..DecodeArgs::default()
    };
    assert_eq!(collect_reports(&args).unwrap(), vec!["KSFO 151756Z -RA"]);

    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "\n\n   \n").unwrap();
    let args = DecodeArgs {
        input_path: Some(empty),
        ..DecodeArgs::default()
    };
    assert!(matches!(collect_reports(&args), Err(Error::EmptyInput)));
}

#[test]
fn test_config_file_and_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[decoder]\nslp_split_threshold = 600\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let mut config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.decoder.slp_split_threshold, 600);
    assert_eq!(config.output.format, OutputStyle::Json);
    assert_eq!(config.decoder.named_visual_approaches.len(), 3);

    let args = DecodeArgs {
        output_format: Some(OutputFormat::Human),
        no_color: true,
        verbose: 2,
        ..DecodeArgs::default()
    };
    apply_cli_overrides(&mut config, &args);
    assert_eq!(config.output.format, OutputStyle::Human);
    assert!(!config.output.color);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[decoder]\nslp_split_threshold = \"high\"\n").unwrap();
    assert!(matches!(
        Config::load(Some(&path)),
        Err(Error::ConfigParse { .. })
    ));

    fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
    assert!(matches!(
        Config::load(Some(&path)),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_render_batch() {
    let reports = vec![
        decode(&RawReport::detect("KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996")),
        decode(&RawReport::detect("TAF KLAX 151130Z 1512/1618 28015KT P6SM SKC")),
    ];

    let config = Config::default().without_color();
    let text = render(&reports, &config).unwrap();
    assert!(text.contains("METAR KSFO"));
    assert!(text.contains("TAF KLAX"));

    let config = config.with_output_style(OutputStyle::Json);
    let json = render(&reports, &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["kind"], "taf");
}
