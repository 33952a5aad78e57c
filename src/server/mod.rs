mod handlers;
mod state;
mod static_files;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::air::{AirKoreaService, AirQualityResolver, KakaoGeocoder};
use crate::config::Config;

pub fn build_router(config: &Config) -> Router {
    let agent = ureq::agent();
    let resolver = AirQualityResolver::new(
        KakaoGeocoder::new(agent.clone(), config.kakao_rest_api_key.clone()),
        AirKoreaService::new(agent, config.airkorea_service_key.clone()),
    );
    let state = Arc::new(AppState { resolver });

    Router::new()
        .route("/", get(handlers::index))
        .route("/style.css", get(handlers::style))
        .route("/app.js", get(handlers::script))
        .route("/api/air", get(handlers::air))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, config: &Config) {
    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  finedust server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
