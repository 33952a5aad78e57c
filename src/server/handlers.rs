use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::air::{AirQualityError, AirQualityReport, Grade, MeasuredValue};
use crate::location::Coordinate;

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn air_error(e: AirQualityError) -> ApiError {
    let status = match &e {
        AirQualityError::NoCoordinateFound
        | AirQualityError::NoStationFound
        | AirQualityError::NoReading(_) => StatusCode::NOT_FOUND,
        AirQualityError::Network(_) | AirQualityError::InvalidResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    api_error(status, e.to_string())
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    ([(header::CONTENT_TYPE, "text/css")], static_files::STYLE_CSS).into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/air ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AirQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Serialize)]
pub struct GradeBody {
    code: Grade,
    label: &'static str,
    emoji: &'static str,
    color: &'static str,
}

impl From<Grade> for GradeBody {
    fn from(grade: Grade) -> Self {
        Self {
            code: grade,
            label: grade.label(),
            emoji: grade.emoji(),
            color: grade.color(),
        }
    }
}

#[derive(Serialize)]
pub struct PollutantBody {
    value: Option<String>,
    grade: GradeBody,
}

fn pollutant(value: &Option<String>, grade: Grade) -> PollutantBody {
    PollutantBody {
        value: value.clone(),
        grade: grade.into(),
    }
}

#[derive(Serialize)]
pub struct AirBody {
    station: String,
    address: Option<String>,
    data_time: Option<String>,
    khai: PollutantBody,
    pm10: PollutantBody,
    pm25: PollutantBody,
    so2: PollutantBody,
    co: PollutantBody,
    o3: PollutantBody,
    no2: PollutantBody,
}

impl From<AirQualityReport> for AirBody {
    fn from(report: AirQualityReport) -> Self {
        let m: MeasuredValue = report.measured;
        Self {
            station: report.station.station_name,
            address: report.station.addr,
            data_time: m.data_time,
            khai: pollutant(&m.khai_value, m.khai_grade),
            pm10: pollutant(&m.pm10_value, m.pm10_grade),
            pm25: pollutant(&m.pm25_value, m.pm25_grade),
            so2: pollutant(&m.so2_value, m.so2_grade),
            co: pollutant(&m.co_value, m.co_grade),
            o3: pollutant(&m.o3_value, m.o3_grade),
            no2: pollutant(&m.no2_value, m.no2_grade),
        }
    }
}

pub async fn air(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AirQuery>,
) -> Result<Json<AirBody>, ApiError> {
    let start = Instant::now();

    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Missing 'lat'/'lon' parameters",
        ));
    };
    let coord = Coordinate::new(lat, lon)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    // ureq is blocking; keep it off the async workers.
    let resolver = state.resolver.clone();
    let report = tokio::task::spawn_blocking(move || resolver.fetch(coord))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(air_error)?;

    eprintln!(
        "[{}] GET /api/air?lat={}&lon={} -> {} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        lat,
        lon,
        report.station.station_name,
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(report.into()))
}
