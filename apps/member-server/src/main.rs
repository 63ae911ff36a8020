use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use member_api::{build_router, identity::JwtBearerIdentity, AppState};
use member_core::services::MemberService;
use member_infrastructure::database::{create_pool, run_migrations, PgUserRepository};
use member_infrastructure::media::CloudinaryPhotoService;
use member_security::JwtService;
use member_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    member_shared::telemetry::init_telemetry();

    info!("Member server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    run_migrations(&pool).await?;
    info!("Database connection established, migrations applied.");

    // Adapters
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let photo_service = Arc::new(CloudinaryPhotoService::new(&config.media)?);
    let identity = Arc::new(JwtBearerIdentity::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    )));

    // Create App State
    let state = AppState {
        member_service: Arc::new(MemberService::new(user_repo, photo_service)),
        identity,
        db: Some(pool),
    };

    let app = build_router(state, config.app.max_upload_bytes).layer(cors_layer(&config)?);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Member server stopped");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::LOCATION]);

    match config.app.cors_origin.as_deref() {
        Some(origin) => Ok(layer.allow_origin(origin.parse::<HeaderValue>()?)),
        None if config.is_production() => {
            warn!("No CORS origin configured; cross-origin requests will be refused");
            Ok(layer)
        }
        None => Ok(layer.allow_origin(tower_http::cors::Any)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
