//! Human-readable report printed to standard output

use crate::data::ForecastResponse;
use crate::table::{build_table, TableError};

/// One decimal place, or `null` when the API reported no value
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "null".to_string(),
    }
}

/// Location and current-conditions lines followed by the 15-minutely table
pub fn render_report(forecast: &ForecastResponse) -> Result<String, TableError> {
    let table = build_table(&forecast.minutely_15)?;
    let location = &forecast.location;
    let current = &forecast.current;

    let mut lines = vec![
        format!("Coordinates {}°N {}°E", location.latitude, location.longitude),
        format!("Elevation {:.1} m asl", location.elevation),
        format!(
            "Timezone {} {}",
            location.timezone, location.timezone_abbreviation
        ),
        format!(
            "Timezone difference to GMT+0 {} s",
            location.utc_offset_seconds
        ),
        String::new(),
        format!("Current time {}", current.time.format("%Y-%m-%d %H:%M:%S UTC")),
    ];
    lines.extend(
        current
            .values
            .iter()
            .map(|v| format!("Current {} {}", v.variable, format_value(v.value))),
    );
    lines.push(String::new());

    let mut report = lines.join("\n");
    report.push('\n');
    report.push_str(&table.to_string());
    Ok(report)
}
