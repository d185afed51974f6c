//! Credential Service - Entry point.

use credential_service::{
    api::{create_router, AppState},
    config::Config,
    AuthService, IdentityStore, TokenIssuer,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Credential Service");

    let issuer = TokenIssuer::new(
        config.auth.signing_key_bytes(),
        config.auth.algorithm,
        config.auth.token_ttl,
    );
    info!(
        algorithm = ?config.auth.algorithm,
        token_ttl = ?config.auth.token_ttl,
        "Token issuer configured"
    );

    let auth = AuthService::new(IdentityStore::new(), issuer);
    let app = create_router(AppState::new(auth));

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
