//! Human-readable rendering of decoded reports
//!
//! Output is a header line followed by titled sections (weather, operations,
//! notices, advisories, remarks, unrecognized). Empty sections are left out,
//! every populated field is rendered, and the same record always renders to
//! the same text. Section titles are optionally colored for terminals.

use crate::app::models::{
    AltimeterInfo, AtisService, CloudLayer, DatisRecord, DecodedReport, ExtremeKind,
    ForecastSegment, MetarRecord, RemarkSet, TafRecord, TemperatureInfo, VisibilityInfo,
    WeatherPhenomenon, WindInfo, thousands,
};
use colored::Colorize;

/// Renders decoded records as text
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    color: bool,
}

impl Formatter {
    /// Plain text, no terminal escapes
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Section titles colored for a terminal
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    pub fn format(&self, report: &DecodedReport) -> String {
        match report {
            DecodedReport::Metar(record) => self.metar(record),
            DecodedReport::Taf(record) => self.taf(record),
            DecodedReport::Datis(record) => self.datis(record),
        }
    }

    pub fn metar(&self, record: &MetarRecord) -> String {
        let mut title = vec![
            if record.is_special { "SPECI" } else { "METAR" }.to_string(),
            station(&record.station),
        ];
        if let Some(observed) = record.observed {
            title.push(format!("observed {}", observed));
        }
        push_flags(
            &mut title,
            &[
                (record.auto, "automated"),
                (record.corrected, "corrected"),
                (record.nil, "missing report"),
            ],
        );

        let mut weather = weather_lines(&Conditions {
            wind: record.wind.as_ref(),
            visibility: record.visibility.as_ref(),
            weather: &record.weather,
            clouds: &record.clouds,
            temperature: record.temperature.as_ref(),
            dewpoint: record.dewpoint.as_ref(),
            altimeter: record.altimeter.as_ref(),
        });
        if record.no_significant_change {
            weather.push("Trend: no significant change".to_string());
        }

        let mut unrecognized = record.unparsed.clone();
        unrecognized.extend(record.remarks.passthrough.iter().cloned());

        self.render(
            &title.join(" "),
            vec![
                ("Weather", weather),
                ("Remarks", remark_lines(&record.remarks)),
                ("Unrecognized", unrecognized),
            ],
        )
    }

    pub fn taf(&self, record: &TafRecord) -> String {
        let mut title = vec!["TAF".to_string(), station(&record.station)];
        if let Some(issued) = record.issued {
            title.push(format!("issued {}", issued));
        }
        match (record.valid_from, record.valid_to) {
            (Some(from), Some(to)) => title.push(format!("valid {} to {}", from, to)),
            (Some(from), None) => title.push(format!("valid from {}", from)),
            _ => {}
        }
        push_flags(
            &mut title,
            &[
                (record.amended, "amended"),
                (record.corrected, "corrected"),
                (record.nil, "missing forecast"),
            ],
        );

        let segment_titles: Vec<String> = record
            .segments
            .iter()
            .map(|segment| segment.kind.to_string())
            .collect();
        let mut sections: Vec<(&str, Vec<String>)> = record
            .segments
            .iter()
            .zip(&segment_titles)
            .map(|(segment, title)| (title.as_str(), segment_lines(segment)))
            .collect();
        sections.push(("Remarks", remark_lines(&record.remarks)));
        sections.push(("Unrecognized", record.remarks.passthrough.clone()));

        self.render(&title.join(" "), sections)
    }

    pub fn datis(&self, record: &DatisRecord) -> String {
        let mut title = vec!["DATIS".to_string(), station(&record.station)];
        if let Some(service) = record.service {
            title.push(
                match service {
                    AtisService::Arrival => "arrival",
                    AtisService::Departure => "departure",
                    AtisService::Combined => "arrival/departure",
                }
                .to_string(),
            );
        }
        if let Some(letter) = record.info_letter {
            title.push(format!("information {}", letter));
        }
        if let Some(time) = record.info_time {
            title.push(format!("at {}Z", time.format("%H%M")));
        }

        let weather = weather_lines(&Conditions {
            wind: record.wind.as_ref(),
            visibility: record.visibility.as_ref(),
            weather: &record.weather,
            clouds: &record.clouds,
            temperature: record.temperature.as_ref(),
            dewpoint: record.dewpoint.as_ref(),
            altimeter: record.altimeter.as_ref(),
        });

        let operations: Vec<String> = record
            .approaches
            .iter()
            .map(ToString::to_string)
            .chain(record.departures.iter().map(ToString::to_string))
            .collect();

        let notices: Vec<String> = record
            .closed_runways
            .iter()
            .map(ToString::to_string)
            .chain(record.closed_taxiways.iter().map(ToString::to_string))
            .chain(record.notams.iter().map(ToString::to_string))
            .collect();

        self.render(
            &title.join(" "),
            vec![
                ("Weather", weather),
                ("Operations", operations),
                ("NOTAMs", notices),
                ("Advisories", record.advisories.iter().map(ToString::to_string).collect()),
                ("Unrecognized", record.unrecognized.clone()),
            ],
        )
    }

    fn render(&self, title: &str, sections: Vec<(&str, Vec<String>)>) -> String {
        let mut out = vec![self.heading(title, true)];
        for (name, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            out.push(String::new());
            out.push(self.heading(name, false));
            out.extend(lines.into_iter().map(|line| format!("  {}", line)));
        }
        out.join("\n")
    }

    fn heading(&self, text: &str, top: bool) -> String {
        match (self.color, top) {
            (false, _) => text.to_string(),
            (true, true) => text.bright_green().bold().to_string(),
            (true, false) => text.bright_cyan().to_string(),
        }
    }
}

/// Render with plain section titles
pub fn format(report: &DecodedReport) -> String {
    Formatter::plain().format(report)
}

/// Borrowed view of the primitive fields every record carries
struct Conditions<'a> {
    wind: Option<&'a WindInfo>,
    visibility: Option<&'a VisibilityInfo>,
    weather: &'a [WeatherPhenomenon],
    clouds: &'a [CloudLayer],
    temperature: Option<&'a TemperatureInfo>,
    dewpoint: Option<&'a TemperatureInfo>,
    altimeter: Option<&'a AltimeterInfo>,
}

fn weather_lines(conditions: &Conditions<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(wind) = conditions.wind {
        lines.push(format!("Wind: {}", wind));
    }
    if let Some(visibility) = conditions.visibility {
        lines.push(format!("Visibility: {}", visibility));
    }
    if !conditions.weather.is_empty() {
        lines.push(format!("Weather: {}", join(conditions.weather)));
    }
    if !conditions.clouds.is_empty() {
        lines.push(format!("Clouds: {}", join(conditions.clouds)));
    }
    if let Some(temperature) = conditions.temperature {
        lines.push(format!("Temperature: {}", temperature));
    }
    if let Some(dewpoint) = conditions.dewpoint {
        lines.push(format!("Dewpoint: {}", dewpoint));
    }
    if let Some(altimeter) = conditions.altimeter.filter(|a| !a.is_empty()) {
        lines.push(format!("Altimeter: {}", altimeter));
    }
    lines
}

fn segment_lines(segment: &ForecastSegment) -> Vec<String> {
    let mut lines = weather_lines(&Conditions {
        wind: segment.wind.as_ref(),
        visibility: segment.visibility.as_ref(),
        weather: &segment.weather,
        clouds: &segment.clouds,
        temperature: segment.temperature.as_ref(),
        dewpoint: segment.dewpoint.as_ref(),
        altimeter: segment.altimeter.as_ref(),
    });
    if segment.no_significant_weather {
        lines.push("Weather: no significant weather".to_string());
    }
    for extreme in &segment.temperature_extremes {
        let label = match extreme.kind {
            ExtremeKind::Maximum => "Maximum temperature",
            ExtremeKind::Minimum => "Minimum temperature",
        };
        lines.push(format!(
            "{}: {} at {}",
            label,
            TemperatureInfo::new(extreme.celsius),
            extreme.at
        ));
    }
    for shear in &segment.wind_shear {
        lines.push(format!(
            "Wind shear: {} at {} ft",
            shear.wind,
            thousands(shear.height_feet)
        ));
    }
    if !segment.unparsed.is_empty() {
        lines.push(format!("Unrecognized: {}", segment.unparsed.join(" ")));
    }
    if lines.is_empty() {
        lines.push("No conditions stated".to_string());
    }
    lines
}

fn remark_lines(remarks: &RemarkSet) -> Vec<String> {
    remarks.remarks.iter().map(ToString::to_string).collect()
}

fn station(station: &Option<String>) -> String {
    station.clone().unwrap_or_else(|| "(unknown station)".to_string())
}

fn push_flags(title: &mut Vec<String>, flags: &[(bool, &str)]) {
    let set: Vec<&str> = flags.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
    if !set.is_empty() {
        title.push(format!("({})", set.join(", ")));
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
