use std::sync::Arc;

use storefront_checkout::cart::AppState;
use storefront_checkout::checkout::gateway::HttpGateway;
use storefront_checkout::config::Config;
use storefront_checkout::router::create_app_router;
use tracing::info;

#[tokio::main]
async fn main() {
    // Structured logging, overridable via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_checkout=info".into()),
        )
        .init();

    let config = Config::from_env();
    let addr = config.bind_addr;

    // Gateway client and application state
    let gateway = Arc::new(HttpGateway::new(config.gateway_url.clone()).unwrap());
    let state = Arc::new(AppState::new(config, gateway));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    info!(%addr, "storefront server starting");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
