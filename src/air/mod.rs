//! Air quality subsystem.
//!
//! Two REST services, called in sequence: the Kakao local API converts a
//! geographic coordinate into the TM grid the national air-quality service
//! uses, then AirKorea lists nearby monitoring stations and serves each
//! station's realtime pollutant measurements.

pub mod grade;
pub mod providers;
pub mod resolver;
pub mod types;

pub use grade::Grade;
pub use providers::{AirKoreaService, KakaoGeocoder};
pub use resolver::{nearest_station, AirQualityResolver};
pub use types::{AirQualityError, AirQualityReport, MeasuredValue, MonitoringStation, TmCoordinate};
