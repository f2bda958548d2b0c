use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use study_up::config::Settings;
use study_up::core::Recommender;
use study_up::routes::{self, recommendations::AppState};
use study_up::services::ProfileStoreClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging; RUST_LOG takes precedence over LOG_LEVEL
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Study Up recommendation service...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(settings.profile_store.timeout_secs.unwrap_or(10));
    let store = ProfileStoreClient::new(
        settings.profile_store.endpoint.clone(),
        settings.profile_store.api_key.clone(),
        timeout,
    )
    .map_err(|e| {
        error!("Failed to create profile store client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Profile store client initialized ({})", settings.profile_store.endpoint);

    let weights = settings.scoring_weights();
    let recommender = Recommender::new(weights);

    info!("Recommender initialized with weights: {:?}", weights);

    let app_state = AppState {
        store: Arc::new(store),
        recommender,
        limits: settings.recommendation,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
