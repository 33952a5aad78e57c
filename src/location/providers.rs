//! IP-based geolocation, the auto-detect analogue of a device location fix.

use super::types::{Coordinate, LocationError, LocationSource, ResolvedPosition};
use serde::Deserialize;

const IP_API_URL: &str = "https://ipapi.co/json/";
const USER_AGENT: &str = concat!("finedust/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

/// Auto-detect the current position via IP geolocation.
pub fn ip_geolocate(agent: &ureq::Agent) -> Result<ResolvedPosition, LocationError> {
    let response = agent
        .get(IP_API_URL)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let r: IpApiResult = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    let lat = r
        .latitude
        .ok_or_else(|| LocationError::InvalidResponse("no latitude".into()))?;
    let lon = r
        .longitude
        .ok_or_else(|| LocationError::InvalidResponse("no longitude".into()))?;

    Ok(ResolvedPosition {
        coordinate: Coordinate::new(lat, lon)?,
        source: LocationSource::IpApi,
        city: r.city,
        country: r.country_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_api_result_parse() {
        let json = r#"{
            "ip": "203.0.113.9",
            "city": "Seoul",
            "region": "Seoul",
            "country_name": "South Korea",
            "latitude": 37.5665,
            "longitude": 126.978,
            "timezone": "Asia/Seoul"
        }"#;
        let r: IpApiResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.latitude, Some(37.5665));
        assert_eq!(r.city.as_deref(), Some("Seoul"));
    }

    #[test]
    fn test_ip_api_result_missing_fields() {
        let r: IpApiResult = serde_json::from_str(r#"{"ip": "203.0.113.9"}"#).unwrap();
        assert!(r.latitude.is_none());
        assert!(r.country_name.is_none());
    }
}
