use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::hub::Stats;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    active_sessions: usize,
    active_connections: usize,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let now = OffsetDateTime::now_utc();
    let time = now
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let stats = app_state
        .broker()
        .send(Stats)
        .await
        .map_err(|err| AppError::internal(format!("broker unavailable: {err}")))?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        app_version,
        active_sessions: stats.active_sessions,
        active_connections: stats.active_connections,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
