//! Station resolution and reading fetch.
//!
//! Flow: coordinate → TM transcoding (first document wins) → nearby station
//! listing → minimum-distance selection → latest realtime reading. Single
//! attempt, sequential; any failure aborts the whole cycle.

use super::providers::{AirKoreaService, KakaoGeocoder};
use super::types::{
    AirQualityError, AirQualityReport, MeasuredValue, MonitoringStation, TmCoordinate,
};
use crate::location::Coordinate;

/// Pick the station with the minimum distance metric.
///
/// A missing `tm` ranks after every present one; ties keep provider order
/// (first minimum wins). Returns None only for an empty list.
pub fn nearest_station(stations: Vec<MonitoringStation>) -> Option<MonitoringStation> {
    stations.into_iter().min_by(|a, b| {
        a.tm.unwrap_or(f64::INFINITY)
            .total_cmp(&b.tm.unwrap_or(f64::INFINITY))
    })
}

/// First geocoder document wins; an empty list means the coordinate has no
/// TM projection (outside the provider's coverage).
fn first_document(documents: Vec<TmCoordinate>) -> Result<TmCoordinate, AirQualityError> {
    documents
        .into_iter()
        .next()
        .ok_or(AirQualityError::NoCoordinateFound)
}

/// Orchestrates the two providers into the full fetch sequence.
#[derive(Clone)]
pub struct AirQualityResolver {
    geocoder: KakaoGeocoder,
    air_korea: AirKoreaService,
}

impl AirQualityResolver {
    pub fn new(geocoder: KakaoGeocoder, air_korea: AirKoreaService) -> Self {
        Self { geocoder, air_korea }
    }

    /// Resolve the single nearest monitoring station for a coordinate.
    ///
    /// Fails with `NoCoordinateFound` before any station call when the
    /// geocoder returns no documents, and with `NoStationFound` when the
    /// station listing is empty.
    pub fn resolve_station(
        &self,
        coord: Coordinate,
    ) -> Result<MonitoringStation, AirQualityError> {
        let tm = self.resolve_tm(coord)?;
        let stations = self.air_korea.nearby_stations(tm)?;
        nearest_station(stations).ok_or(AirQualityError::NoStationFound)
    }

    /// First TM document for a coordinate, in provider order. Failing here
    /// aborts the sequence before any station call is made.
    fn resolve_tm(&self, coord: Coordinate) -> Result<TmCoordinate, AirQualityError> {
        first_document(self.geocoder.tm_coordinates(coord)?)
    }

    /// Latest reading for a station (the realtime list is newest first).
    pub fn latest_reading(&self, station_name: &str) -> Result<MeasuredValue, AirQualityError> {
        let readings = self.air_korea.realtime_readings(station_name)?;
        readings
            .into_iter()
            .next()
            .ok_or_else(|| AirQualityError::NoReading(station_name.to_string()))
    }

    /// The full sequence: nearest station, then its latest reading.
    pub fn fetch(&self, coord: Coordinate) -> Result<AirQualityReport, AirQualityError> {
        let station = self.resolve_station(coord)?;
        let measured = self.latest_reading(&station.station_name)?;
        Ok(AirQualityReport { station, measured })
    }

    /// Reading for an explicitly named station, skipping resolution.
    pub fn fetch_station(&self, station_name: &str) -> Result<AirQualityReport, AirQualityError> {
        let measured = self.latest_reading(station_name)?;
        Ok(AirQualityReport {
            station: MonitoringStation {
                station_name: station_name.to_string(),
                addr: None,
                tm: None,
            },
            measured,
        })
    }
}
