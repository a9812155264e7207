mod cli;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use todo_gateway::{App, AppState, RouterConfig};
use todo_storage::{InMemoryRepository, MongoConfig, MongoRepository, TodoRepository};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting todo gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(&config, InMemoryRepository::new()).await?;
        }
        StorageBackendArg::Mongodb => {
            let uri = config
                .mongodb_uri
                .clone()
                .ok_or("mongodb uri is required when storage backend is mongodb")?;
            let mongo_config = MongoConfig::builder()
                .uri(uri)
                .database(config.mongodb_database.clone())
                .collection(config.mongodb_collection.clone())
                .build();
            let repository = MongoRepository::connect(&mongo_config).await?;
            run_server(&config, repository).await?;
        }
    }

    Ok(())
}

async fn run_server<R: TodoRepository>(
    config: &CLI,
    repository: R,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository: Arc<dyn TodoRepository> = Arc::new(repository);

    if let Err(err) = repository.ping().await {
        warn!(error = %err, "store is not reachable yet");
    }

    let router = App::router(
        AppState::new(Arc::clone(&repository)),
        RouterConfig::builder()
            .favicon_path(config.favicon_path.clone())
            .request_timeout(Duration::from_secs(config.request_timeout_secs))
            .build(),
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.shutdown().await;
    info!("todo gateway stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
