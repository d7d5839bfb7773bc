use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracks_api::domain::DomainError;
use tracks_api::infrastructure::AppState;
use tracks_api::{config, db, seed, server};

/// Failures that stop the service from starting or keep it from serving
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] DomainError),
    #[error("Failed to initialize database: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("No available port found starting from {0}")]
    NoPort(u16),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracks_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Check for --profile CLI argument
    let args: Vec<String> = std::env::args().collect();
    let profile = args
        .iter()
        .position(|arg| arg == "--profile")
        .and_then(|pos| args.get(pos + 1))
        .cloned();

    let config = config::Config::from_env(profile)?;
    tracing::info!("Starting tracks-api with profile '{}'", config.profile);

    // Initialize database
    let db = db::init_db(&config.database_url).await?;

    let state = AppState::new(db, config.jwt.clone());

    // Check for seed flag
    if std::env::var("SEED_DEMO").is_ok() {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&state).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    let app = server::build_router(state, &config.cors_allowed_origins);

    // Find available port
    let port = server::find_available_port(config.port)
        .ok_or(StartupError::NoPort(config.port))?;

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    server::serve(app, port).await?;
    Ok(())
}
