//! REST providers: Kakao local API (TM transcoding) and AirKorea.
//!
//! Both are explicit client objects over a shared `ureq::Agent`, constructed
//! once at startup and handed to the resolver. Wire envelopes stay private;
//! callers only see domain types.

use super::types::{AirQualityError, MeasuredValue, MonitoringStation, TmCoordinate};
use crate::location::Coordinate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const KAKAO_TRANSCOORD_URL: &str = "https://dapi.kakao.com/v2/local/geo/transcoord.json";
const AIR_KOREA_BASE_URL: &str = "http://apis.data.go.kr/B552584";

// ─── Kakao geocoder ──────────────────────────────────────────────

#[derive(Deserialize)]
struct TranscoordResponse {
    #[serde(default)]
    documents: Vec<TmDocument>,
}

#[derive(Deserialize)]
struct TmDocument {
    x: f64,
    y: f64,
}

/// Converts geographic coordinates into the TM grid AirKorea queries expect.
#[derive(Clone)]
pub struct KakaoGeocoder {
    agent: ureq::Agent,
    api_key: String,
}

impl KakaoGeocoder {
    pub fn new(agent: ureq::Agent, api_key: impl Into<String>) -> Self {
        Self {
            agent,
            api_key: api_key.into(),
        }
    }

    /// Candidate TM coordinates for a geographic coordinate, in provider
    /// order. The Kakao API takes x=longitude, y=latitude.
    pub fn tm_coordinates(
        &self,
        coord: Coordinate,
    ) -> Result<Vec<TmCoordinate>, AirQualityError> {
        let response = self
            .agent
            .get(KAKAO_TRANSCOORD_URL)
            .query("x", &coord.lon.to_string())
            .query("y", &coord.lat.to_string())
            .query("output_coord", "TM")
            .set("Authorization", &format!("KakaoAK {}", self.api_key))
            .call()
            .map_err(|e| AirQualityError::Network(e.to_string()))?;

        let parsed: TranscoordResponse = response
            .into_json()
            .map_err(|e| AirQualityError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .documents
            .into_iter()
            .map(|d| TmCoordinate { x: d.x, y: d.y })
            .collect())
    }
}

// ─── AirKorea service ────────────────────────────────────────────

// Every AirKorea payload nests its items under response.body.items; any
// layer may be absent on provider-side errors.
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct AirKoreaEnvelope<T> {
    #[serde(default)]
    response: Option<AirKoreaResponse<T>>,
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct AirKoreaResponse<T> {
    #[serde(default)]
    body: Option<AirKoreaBody<T>>,
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct AirKoreaBody<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
}

impl<T> AirKoreaEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        self.response
            .and_then(|r| r.body)
            .and_then(|b| b.items)
            .unwrap_or_default()
    }
}

/// Client for the two AirKorea endpoints: nearby station listing and
/// per-station realtime measurements.
#[derive(Clone)]
pub struct AirKoreaService {
    agent: ureq::Agent,
    service_key: String,
}

impl AirKoreaService {
    pub fn new(agent: ureq::Agent, service_key: impl Into<String>) -> Self {
        Self {
            agent,
            service_key: service_key.into(),
        }
    }

    fn get_items<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, AirQualityError> {
        let url = format!("{}/{}", AIR_KOREA_BASE_URL, path);
        let mut request = self
            .agent
            .get(&url)
            .query("serviceKey", &self.service_key)
            .query("returnType", "json");
        for (name, value) in params {
            request = request.query(name, value);
        }

        let response = request
            .call()
            .map_err(|e| AirQualityError::Network(e.to_string()))?;

        let envelope: AirKoreaEnvelope<T> = response
            .into_json()
            .map_err(|e| AirQualityError::InvalidResponse(e.to_string()))?;

        Ok(envelope.into_items())
    }

    /// Stations near a TM coordinate, in provider order, each optionally
    /// carrying its distance from the queried point.
    pub fn nearby_stations(
        &self,
        tm: TmCoordinate,
    ) -> Result<Vec<MonitoringStation>, AirQualityError> {
        self.get_items(
            "MsrstnInfoInqireSvc/getNearbyMsrstnList",
            &[("tmX", &tm.x.to_string()), ("tmY", &tm.y.to_string())],
        )
    }

    /// Realtime measurements for a station, newest first.
    pub fn realtime_readings(
        &self,
        station_name: &str,
    ) -> Result<Vec<MeasuredValue>, AirQualityError> {
        self.get_items(
            "ArpltnInforInqireSvc/getMsrstnAcctoRltmMesureDnsty",
            &[
                ("stationName", station_name),
                ("dataTerm", "DAILY"),
                ("ver", "1.3"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::grade::Grade;

    #[test]
    fn test_transcoord_parse() {
        let json = r#"{
            "meta": {"total_count": 1},
            "documents": [{"x": 200000.91, "y": 450000.55}]
        }"#;
        let parsed: TranscoordResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.documents.len(), 1);
        assert!((parsed.documents[0].x - 200000.91).abs() < 1e-6);
    }

    #[test]
    fn test_transcoord_empty_documents() {
        let parsed: TranscoordResponse = serde_json::from_str(r#"{"documents": []}"#).unwrap();
        assert!(parsed.documents.is_empty());
        let parsed: TranscoordResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.documents.is_empty());
    }

    #[test]
    fn test_station_envelope_parse() {
        let json = r#"{
            "response": {
                "header": {"resultCode": "00", "resultMsg": "NORMAL_CODE"},
                "body": {
                    "totalCount": 3,
                    "items": [
                        {"stationName": "중구", "addr": "서울 중구 덕수궁길 15", "tm": 1.2},
                        {"stationName": "종로구", "addr": "서울 종로구 종로35가길 19", "tm": 0.3},
                        {"stationName": "용산구", "addr": "서울 용산구 한남대로 136", "tm": 0.9}
                    ]
                }
            }
        }"#;
        let envelope: AirKoreaEnvelope<MonitoringStation> = serde_json::from_str(json).unwrap();
        let stations = envelope.into_items();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[1].station_name, "종로구");
        assert_eq!(stations[1].tm, Some(0.3));
    }

    #[test]
    fn test_reading_envelope_parse() {
        let json = r#"{
            "response": {
                "body": {
                    "items": [
                        {"dataTime": "2026-08-07 14:00", "pm10Value": "45", "pm10Grade": "2"},
                        {"dataTime": "2026-08-07 13:00", "pm10Value": "51", "pm10Grade": "2"}
                    ]
                }
            }
        }"#;
        let envelope: AirKoreaEnvelope<MeasuredValue> = serde_json::from_str(json).unwrap();
        let readings = envelope.into_items();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].data_time.as_deref(), Some("2026-08-07 14:00"));
        assert_eq!(readings[0].pm10_grade, Grade::Normal);
    }

    #[test]
    fn test_envelope_missing_layers() {
        for json in [r#"{}"#, r#"{"response": {}}"#, r#"{"response": {"body": {}}}"#] {
            let envelope: AirKoreaEnvelope<MonitoringStation> =
                serde_json::from_str(json).unwrap();
            assert!(envelope.into_items().is_empty());
        }
    }
}
