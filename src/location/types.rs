//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// How a position was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Manual,
    IpApi,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual"),
            Self::IpApi => write!(f, "IP"),
        }
    }
}

/// A position fix with provenance, the input to station resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPosition {
    pub coordinate: Coordinate,
    pub source: LocationSource,
    /// City name reported by the IP provider, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ResolvedPosition {
    pub fn display_line(&self) -> String {
        let place = match (&self.city, &self.country) {
            (Some(city), Some(country)) => format!("{}, {} ", city, country),
            (Some(city), None) => format!("{} ", city),
            _ => String::new(),
        };
        format!("\u{1F4CD} {}({}) [{}]", place, self.coordinate, self.source)
    }
}

/// Location acquisition errors.
#[derive(Debug)]
pub enum LocationError {
    Network(String),
    InvalidResponse(String),
    InvalidCoordinate { lat: f64, lon: f64 },
    NoInput,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::InvalidCoordinate { lat, lon } => write!(
                f,
                "Invalid coordinates {}, {}. Lat: -90..90, Lon: -180..180",
                lat, lon
            ),
            Self::NoInput => write!(f, "No location specified. Use --lat/--lon or --auto"),
        }
    }
}

impl std::error::Error for LocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_in_range() {
        let c = Coordinate::new(37.5665, 126.9780).unwrap();
        assert!((c.lat - 37.5665).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -200.0).is_err());
    }

    #[test]
    fn test_coordinate_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_display_line_with_place() {
        let pos = ResolvedPosition {
            coordinate: Coordinate { lat: 37.5665, lon: 126.978 },
            source: LocationSource::IpApi,
            city: Some("Seoul".into()),
            country: Some("South Korea".into()),
        };
        let line = pos.display_line();
        assert!(line.contains("Seoul, South Korea"));
        assert!(line.contains("37.5665, 126.9780"));
        assert!(line.contains("[IP]"));
    }

    #[test]
    fn test_display_line_manual() {
        let pos = ResolvedPosition {
            coordinate: Coordinate { lat: 35.1796, lon: 129.0756 },
            source: LocationSource::Manual,
            city: None,
            country: None,
        };
        assert!(pos.display_line().contains("[Manual]"));
    }
}
