use std::time::Instant;

use actix_web::{web, HttpResponse, Responder};
use log::warn;

use crate::{
    handlers::LinkServiceType,
    services::LinkServiceTrait,
    types::{AppState, HealthStatus, ResponsePayload, StoreHealth, StoreStatus},
};

pub mod link;

// Handler function for the root route "/"
async fn index() -> impl Responder {
    let welcome_message = ResponsePayload {
        status: 200,
        message: String::from("Welcome and have a great time!"),
    };

    HttpResponse::Ok().json(welcome_message)
}

// Handler function for the health check endpoint
async fn health_check(
    data: web::Data<AppState>,
    service: web::Data<LinkServiceType>,
) -> impl Responder {
    let uptime = data.start_time.elapsed().as_secs();

    let started = Instant::now();
    let ping = service.ping_store().await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    let store = match ping {
        Ok(()) => StoreHealth {
            backend: data.backend,
            status: StoreStatus::Healthy,
            response_time_ms,
            message: None,
        },
        Err(e) => {
            warn!("Store health check failed: {}", e);
            StoreHealth {
                backend: data.backend,
                status: StoreStatus::Unhealthy,
                response_time_ms,
                message: Some(e.message()),
            }
        }
    };

    let status = HealthStatus {
        status: String::from(if store.status == StoreStatus::Healthy {
            "OK"
        } else {
            "DEGRADED"
        }),
        version: data.version.clone(),
        store,
        uptime_seconds: uptime,
    };

    HttpResponse::Ok().json(status)
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.route("/health", web::get().to(health_check));
    link::configure_routes(cfg);
}
