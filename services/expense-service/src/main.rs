use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use expense_service::{
    config::{Config, StorageBackend},
    database::PostgresExpenseRepository,
    handlers, metrics,
    repository::{ExpenseRepository, InMemoryExpenseRepository},
    services::ExpenseService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .json()
        .init();

    info!("Starting Expense Service...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    info!("Configuration loaded successfully");

    metrics::register_metrics().context("Failed to register metrics")?;

    // Initialize storage
    let repository: Arc<dyn ExpenseRepository> = match config.storage.backend {
        StorageBackend::Postgres => {
            let repository = PostgresExpenseRepository::new(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            )
            .await
            .context("Failed to connect to database")?;
            repository
                .migrate()
                .await
                .context("Failed to prepare database schema")?;

            info!("Database connected successfully");
            Arc::new(repository)
        }
        StorageBackend::Memory => {
            info!("Using in-memory expense storage");
            Arc::new(InMemoryExpenseRepository::new())
        }
    };

    let service = Arc::new(ExpenseService::new(repository));

    // Start HTTP server
    let server_config = config.server.clone();
    let service_data = web::Data::new(service);

    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(service_data.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(handlers::configure_routes)
    })
    .workers(server_config.workers)
    .bind((server_config.host, server_config.port))?
    .run()
    .await?;

    Ok(())
}
