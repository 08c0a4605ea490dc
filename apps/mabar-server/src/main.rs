//! Mabar RBG sign-up sheet server
//!
//! A small web app that turns a pasted player roster into a formatted
//! tabular PDF. Endpoints:
//!
//! - Form page for pasting the roster
//! - Conversion acknowledgment (render, report success/failure)
//! - PDF download as a file attachment
//!
//! The rendering itself lives in the `sheet-engine` crate; this binary
//! only owns HTTP concerns: routing, form extraction, rate limiting,
//! and response construction.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_convert, handle_download, handle_health, handle_index};

/// Command-line arguments for the sheet server
#[derive(Parser, Debug)]
#[command(name = "mabar-server")]
#[command(about = "Mabar RBG sign-up sheet generator")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Render timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Render timeout in milliseconds
    pub timeout_ms: u64,
}

/// Build the application router. Middleware that needs a real peer
/// address (rate limiting) is layered on in `main` only.
fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/convert", post(handle_convert))
        .route("/download", post(handle_download))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mabar-server on {}:{}", args.host, args.port);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    let state = AppState {
        timeout_ms: args.timeout_ms,
    };

    let app = router(state).layer(GovernorLayer {
        config: governor_conf,
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Render timeout: {}ms", args.timeout_ms);

    // The rate limiter keys on the peer IP, so serve with connect info.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
