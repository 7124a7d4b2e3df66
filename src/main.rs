use coupon_manager::{
    config::{self, database},
    errors::Result,
    web::{self, AppState},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file. Non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let bind_address = app_config.server.bind_address.clone();

    // 4. Open the coupon store and make sure the schema exists
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to open coupon store: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Coupon store initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve until a shutdown signal arrives
    let state = AppState::new(db.clone(), app_config)?;
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {}", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Close the store once in-flight requests have drained
    db.close().await?;
    info!("Coupon store closed");

    Ok(())
}
