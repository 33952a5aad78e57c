//! Terminal report rendering.
//!
//! One fetch cycle produces one report; absent values render as "???"
//! rather than dropping the line. Measurement timestamps are provider-local
//! (Asia/Seoul).

use crate::air::{AirQualityReport, Grade, MeasuredValue};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Seoul;

const DATA_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the full human-readable report.
pub fn render_report(report: &AirQualityReport) -> String {
    render_report_at(report, Utc::now())
}

fn render_report_at(report: &AirQualityReport, now: DateTime<Utc>) -> String {
    let station = &report.station;
    let m = &report.measured;

    let mut out = String::new();
    out.push_str(&format!("\u{1F3E0} {}", station.station_name));
    if let Some(addr) = &station.addr {
        out.push_str(&format!(" \u{2014} {}", addr));
    }
    out.push('\n');

    out.push_str(&format!(
        "   Integrated: {}{}\n",
        m.khai_grade,
        m.khai_value
            .as_deref()
            .map(|v| format!(" (KHAI {})", v))
            .unwrap_or_default(),
    ));

    out.push_str(&measurement_time_line(m, now));
    out.push('\n');

    out.push_str(&pollutant_line("PM10 (fine dust)", m.pm10_value.as_deref(), "\u{338D}/\u{33A5}", m.pm10_grade));
    out.push_str(&pollutant_line("PM2.5 (ultrafine)", m.pm25_value.as_deref(), "\u{338D}/\u{33A5}", m.pm25_grade));
    out.push_str(&pollutant_line("SO2", m.so2_value.as_deref(), "ppm", m.so2_grade));
    out.push_str(&pollutant_line("CO", m.co_value.as_deref(), "ppm", m.co_grade));
    out.push_str(&pollutant_line("O3", m.o3_value.as_deref(), "ppm", m.o3_grade));
    out.push_str(&pollutant_line("NO2", m.no2_value.as_deref(), "ppm", m.no2_grade));

    out
}

fn pollutant_line(label: &str, value: Option<&str>, unit: &str, grade: Grade) -> String {
    format!(
        "   {:<18} {:>6} {:<4} {}\n",
        label,
        value.unwrap_or("???"),
        unit,
        grade,
    )
}

fn measurement_time_line(m: &MeasuredValue, now: DateTime<Utc>) -> String {
    let Some(data_time) = m.data_time.as_deref() else {
        return "   Measured: ???".to_string();
    };
    match parse_data_time(data_time) {
        Some(measured_at) => {
            let age = now.signed_duration_since(measured_at).num_minutes();
            if age >= 0 {
                format!("   Measured: {} KST ({} min ago)", data_time, age)
            } else {
                format!("   Measured: {} KST", data_time)
            }
        }
        None => format!("   Measured: {}", data_time),
    }
}

/// Interpret a provider "YYYY-MM-DD HH:MM" timestamp as Seoul local time.
fn parse_data_time(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, DATA_TIME_FORMAT).ok()?;
    Seoul
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
