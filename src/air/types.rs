//! Core types for the air quality subsystem.

use super::grade::{grade_from_code, Grade};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A projected coordinate in the TM grid used by AirKorea.
///
/// Derived from a geographic coordinate via the Kakao transcoord API and
/// used only transiently to query nearby stations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TmCoordinate {
    pub x: f64,
    pub y: f64,
}

/// A fixed monitoring site publishing periodic pollutant measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringStation {
    /// Station name, unique per provider; the key for the readings endpoint.
    pub station_name: String,
    /// Street address of the site.
    #[serde(default)]
    pub addr: Option<String>,
    /// Distance from the queried TM coordinate. Absent for some rows.
    #[serde(default)]
    pub tm: Option<f64>,
}

/// One point-in-time measurement snapshot for one station.
///
/// Values arrive as numeric strings ("45", "0.003") and may be absent or
/// placeholders ("-") while an instrument is offline; they are kept verbatim.
/// Grades collapse to [`Grade::Unknown`] when absent or unrecognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredValue {
    /// Measurement time, provider-local (Asia/Seoul), "YYYY-MM-DD HH:MM".
    #[serde(default)]
    pub data_time: Option<String>,

    /// Integrated air-quality index (KHAI).
    #[serde(default)]
    pub khai_value: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub khai_grade: Grade,

    #[serde(default)]
    pub pm10_value: Option<String>,
    /// 24-hour moving average.
    #[serde(default)]
    pub pm10_value24: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub pm10_grade: Grade,

    #[serde(default)]
    pub pm25_value: Option<String>,
    /// 24-hour moving average.
    #[serde(default)]
    pub pm25_value24: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub pm25_grade: Grade,

    #[serde(default)]
    pub so2_value: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub so2_grade: Grade,

    #[serde(default)]
    pub co_value: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub co_grade: Grade,

    #[serde(default)]
    pub o3_value: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub o3_grade: Grade,

    #[serde(default)]
    pub no2_value: Option<String>,
    #[serde(default, deserialize_with = "grade_from_code")]
    pub no2_grade: Grade,
}

/// The result of one full fetch cycle: the resolved station and its latest
/// reading. Discarded after one render; nothing is cached across cycles.
#[derive(Debug, Clone, Serialize)]
pub struct AirQualityReport {
    pub station: MonitoringStation,
    pub measured: MeasuredValue,
}

/// Air quality resolution errors.
#[derive(Debug)]
pub enum AirQualityError {
    /// The geocoder returned no TM document for the coordinate.
    NoCoordinateFound,
    /// The station listing was empty for the TM coordinate.
    NoStationFound,
    /// The realtime endpoint returned no reading for the station.
    NoReading(String),
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for AirQualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCoordinateFound => {
                write!(f, "No TM coordinate found — is the location inside Korea?")
            }
            Self::NoStationFound => write!(f, "No monitoring station near the given location"),
            Self::NoReading(station) => {
                write!(f, "No recent measurements for station '{}'", station)
            }
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for AirQualityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_value_parses_wire_names() {
        let json = r#"{
            "dataTime": "2026-08-07 14:00",
            "khaiValue": "88",
            "khaiGrade": "2",
            "pm10Value": "45",
            "pm10Value24": "41",
            "pm10Grade": "2",
            "pm25Value": "22",
            "pm25Grade": "2",
            "so2Value": "0.003",
            "so2Grade": "1",
            "coValue": "0.4",
            "coGrade": "1",
            "o3Value": "0.061",
            "o3Grade": "2",
            "no2Value": "0.018",
            "no2Grade": "1"
        }"#;
        let mv: MeasuredValue = serde_json::from_str(json).unwrap();
        assert_eq!(mv.data_time.as_deref(), Some("2026-08-07 14:00"));
        assert_eq!(mv.pm10_value.as_deref(), Some("45"));
        assert_eq!(mv.pm10_value24.as_deref(), Some("41"));
        assert_eq!(mv.khai_grade, Grade::Normal);
        assert_eq!(mv.so2_grade, Grade::Good);
        // pm25Value24 absent
        assert!(mv.pm25_value24.is_none());
    }

    #[test]
    fn test_measured_value_tolerates_sparse_rows() {
        let mv: MeasuredValue = serde_json::from_str(r#"{"pm10Value":"-"}"#).unwrap();
        assert_eq!(mv.pm10_value.as_deref(), Some("-"));
        assert_eq!(mv.pm10_grade, Grade::Unknown);
        assert_eq!(mv.khai_grade, Grade::Unknown);
        assert!(mv.data_time.is_none());
    }

    #[test]
    fn test_station_missing_tm() {
        let s: MonitoringStation =
            serde_json::from_str(r#"{"stationName":"중구","addr":"서울 중구"}"#).unwrap();
        assert_eq!(s.station_name, "중구");
        assert!(s.tm.is_none());
    }

    #[test]
    fn test_error_display() {
        let e = AirQualityError::NoReading("종로구".into());
        assert!(e.to_string().contains("종로구"));
        assert!(AirQualityError::NoCoordinateFound.to_string().contains("TM"));
    }
}
