use crate::air::AirQualityResolver;

pub struct AppState {
    pub resolver: AirQualityResolver,
}
