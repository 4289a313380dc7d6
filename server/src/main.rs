use tokio::net::TcpListener;
use todo_server::{AppConfig, AppState, InMemoryTodoRepository, PgTodoRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let repository =
                PgTodoRepository::connect(url, config.database_max_connections).await?;
            tracing::info!(
                max_connections = config.database_max_connections,
                "connected to postgres"
            );
            AppState::new(repository)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, todos are kept in memory only");
            AppState::new(InMemoryTodoRepository::new())
        }
    };

    let router = match config.static_dir.as_deref() {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving frontend");
            todo_server::app_with_frontend(state, dir)
        }
        None => todo_server::app(state),
    };

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    todo_server::run_with_shutdown(listener, router, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
