use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{config::StoreBackend, errors::AppError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Serialize, Deserialize)]
pub struct ResponsePayload {
    pub status: i32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub backend: StoreBackend,
    pub status: StoreStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub store: StoreHealth,
    pub uptime_seconds: u64,
}

// Shared, read-only application state
pub struct AppState {
    pub start_time: Instant,
    pub version: String,
    pub backend: StoreBackend,
}
