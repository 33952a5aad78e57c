//! Position resolution — priority chain over the acquisition modes.
//!
//! Manual flags win over auto-detection; with neither, resolution fails
//! with `NoInput`. Each call is a fresh single-attempt fix; nothing is
//! remembered between invocations.

use super::providers;
use super::types::{Coordinate, LocationError, LocationSource, ResolvedPosition};

/// Inputs gathered from the caller (CLI flags or query parameters).
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub auto: bool,
}

/// Resolves a position request into a coordinate fix.
pub struct LocationResolver {
    agent: ureq::Agent,
}

impl LocationResolver {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    /// Resolve with priority: explicit coordinates → auto-detect → NoInput.
    pub fn resolve(&self, request: PositionRequest) -> Result<ResolvedPosition, LocationError> {
        if let (Some(lat), Some(lon)) = (request.lat, request.lon) {
            return Self::from_manual(lat, lon);
        }
        // One flag without the other is a caller mistake, not an auto trigger.
        if request.lat.is_some() != request.lon.is_some() {
            return Err(LocationError::NoInput);
        }
        if request.auto {
            return providers::ip_geolocate(&self.agent);
        }
        Err(LocationError::NoInput)
    }

    /// Build a position from explicit coordinates.
    pub fn from_manual(lat: f64, lon: f64) -> Result<ResolvedPosition, LocationError> {
        Ok(ResolvedPosition {
            coordinate: Coordinate::new(lat, lon)?,
            source: LocationSource::Manual,
            city: None,
            country: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocationResolver {
        LocationResolver::new(ureq::agent())
    }

    #[test]
    fn test_manual_wins() {
        let pos = resolver()
            .resolve(PositionRequest {
                lat: Some(37.5665),
                lon: Some(126.978),
                auto: true,
            })
            .unwrap();
        assert_eq!(pos.source, LocationSource::Manual);
        assert!((pos.coordinate.lat - 37.5665).abs() < 1e-9);
    }

    #[test]
    fn test_manual_out_of_range() {
        let result = resolver().resolve(PositionRequest {
            lat: Some(123.0),
            lon: Some(126.978),
            auto: false,
        });
        assert!(matches!(
            result,
            Err(LocationError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_half_specified_is_no_input() {
        let result = resolver().resolve(PositionRequest {
            lat: Some(37.5665),
            lon: None,
            auto: false,
        });
        assert!(matches!(result, Err(LocationError::NoInput)));
    }

    #[test]
    fn test_nothing_specified_is_no_input() {
        let result = resolver().resolve(PositionRequest::default());
        assert!(matches!(result, Err(LocationError::NoInput)));
    }
}
