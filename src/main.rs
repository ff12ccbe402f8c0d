use chrono::Utc;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use trackside::{
    api::{self, AppState},
    config::{catalog::load_catalog, database, settings::Settings},
    core::{catalog::seed_catalog, semester},
    errors::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    if dotenv().is_err() {
        info!("No .env file found, using the process environment");
    }

    let settings = Settings::from_env()?;

    // 3. Connect and create missing tables
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 4. Seed sectors, stations and the bootstrap admin
    match load_catalog(&settings.catalog_path) {
        Ok(catalog) => {
            seed_catalog(&db, &catalog).await?;
        }
        Err(e) => warn!("Catalog not seeded: {}", e),
    }

    // 5. Clear completion flags if a new semester started since the last run.
    // A failure here must not keep the service down; the next start retries.
    match semester::process_semester_reset(&db, Utc::now()).await {
        Ok(Some(result)) => info!("{}", semester::format_semester_reset_summary(&result)),
        Ok(None) => info!("Semester reset already done for the current semester"),
        Err(e) => error!("Semester reset check failed: {}", e),
    }

    // 6. Serve
    let app = api::app(AppState { db });
    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;
    info!("Listening on {}", settings.bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
