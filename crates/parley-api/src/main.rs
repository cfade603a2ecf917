use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parley::{ActivityHandler, InMemoryActivityStore, InMemoryStateStore, KeywordReplyGenerator};
use parley_api::{config::Config, router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Parley activity relay");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Selection events: {}",
        config.bot.selection_events.join(", ")
    );

    let handler = ActivityHandler::builder()
        .activity_store(Arc::new(InMemoryActivityStore::new()))
        .state_store(Arc::new(InMemoryStateStore::new()))
        .reply_generator(Arc::new(KeywordReplyGenerator::new()))
        .config(config.bot.clone())
        .build()?;

    let state = Arc::new(AppState::new(config.clone(), handler));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Ingest: POST http://{}/api/messages", addr);
    tracing::info!("Poll: GET http://{}/api/conversations/{{id}}/activities?watermark=N", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
