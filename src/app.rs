use std::{sync::Arc, time::Instant};

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{debug, info, warn};

use crate::{
    config::{Config, Environment, ServerConfig, StoreBackend},
    db::Database,
    errors::AppError,
    handlers::LinkServiceType,
    middleware::RequestLogger,
    repositories::{LinkRepository, MemoryLinkRepository, PgLinkRepository},
    routes,
    services::LinkService,
    types::AppState,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<(), AppError> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

// Any origin unless an allow-list is configured
fn build_cors(config: &ServerConfig) -> Cors {
    if config.cors_allowed_origins.is_empty() {
        return Cors::permissive();
    }

    config
        .cors_allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

/// Opens the configured link store. The returned database handle, if any, is
/// closed once the server stops.
async fn open_store(config: &Config) -> AppResult<(Arc<dyn LinkRepository>, Option<Database>)> {
    match config.links.backend {
        StoreBackend::Postgres => {
            let db = Database::connect(&config.db).await?;
            let repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(db.clone()));
            Ok((repository, Some(db)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory link store; links are lost on restart");
            let repository: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
            Ok((repository, None))
        }
    }
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;

    setup_logging(&config)?;

    let start_time = Instant::now();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Debug logging enabled");
        debug!("Full configuration: {:?}", config);
    }

    let (repository, database) = open_store(&config).await?;
    info!("Link store ready ({})", config.links.backend.as_str());

    // One service (and one store client) shared by every worker
    let link_service: web::Data<LinkServiceType> = web::Data::new(
        LinkService::new(repository).with_max_insert_attempts(config.links.max_insert_attempts),
    );

    let enable_debug_logging = config.app.environment != Environment::Production;

    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T"
    } else {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}o"
    };

    let app_config = config.clone();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                start_time,
                version: app_config.app.version.clone(),
                backend: app_config.links.backend,
            }))
            .app_data(link_service.clone())
            // Last wrap runs first: CORS, then access log, then request ids
            .wrap(RequestLogger::new(enable_debug_logging))
            .wrap(Logger::new(log_format))
            .wrap(build_cors(&app_config.server))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await;

    if let Some(db) = database {
        db.shutdown().await;
    }

    result?;
    Ok(())
}
