use dossier_portal::{
    config::Config,
    database::{maintenance, pool, seed},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;

    let db = pool::create_pool(&config.database_url).await?;
    pool::run_migrations(&db).await?;

    if config.seed_demo_data && seed::seed_demo_data(&db).await? {
        info!("Seeded demo accounts and dossiers");
    }

    let addr: SocketAddr = config.server_address().parse()?;
    let reset_on_shutdown = config.reset_on_shutdown;
    let app_state = AppState::new(db.clone(), config);
    let app = routes::router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if reset_on_shutdown {
        info!("Clearing all tables before exit");
        maintenance::clear_all(&db).await?;
    }
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {:?}", e);
        }
    };
    #[cfg(unix)]
    let term = async {
        if let Ok(mut s) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
            s.recv().await;
        }
    };
    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = term => {} }
    info!("Shutdown signal received");
}
