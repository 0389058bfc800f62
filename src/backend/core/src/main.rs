//! SapMock Server - Main entry point
//!
//! Boots the mock SAP OData employee-directory service: builds the master
//! role catalog, seeds the employee store, and serves the OData surface.

use std::sync::Arc;

use sapmock_core::{
    api::{self, AppState},
    config::Config,
    directory::{EmployeeGenerator, EmployeeStore, RoleCatalog},
    observability,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}. Using defaults.", e);
        Config::default()
    });

    // Initialize observability
    observability::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SapMock Server"
    );

    // Build master data and the shared store
    let catalog = Arc::new(RoleCatalog::builtin());
    tracing::info!(roles = catalog.roles().len(), "Master role catalog loaded");

    let store = Arc::new(EmployeeStore::new(config.seed.id_base_offset));
    let generator = Arc::new(EmployeeGenerator::new(
        catalog.clone(),
        config.seed.id_base_offset,
    ));

    // Seed the initial employee collection unless enough records exist
    if store.len() >= config.seed.employee_count {
        tracing::info!(
            existing = store.len(),
            "Store already holds enough employees; skipping seed"
        );
    } else {
        let employees = generator.generate(config.seed.employee_count)?;
        store.replace_all(employees);
        tracing::info!(
            count = config.seed.employee_count,
            "Initial employee data generated"
        );
    }

    // Create app state and router
    let app_state = AppState::new(
        store,
        catalog,
        generator,
        config.odata.metadata_domain.as_str(),
    );
    let app = api::build_router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(address = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
