use clap::Parser;
use echomind::{Journal, ReflectionConfig};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod models;
mod state;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "echomind-server")]
#[command(about = "EchoMind HTTP server - one journaling session per process")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "ECHOMIND_ADDR", default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// Length of the reflection window in days
    #[arg(long, env = "ECHOMIND_WINDOW_DAYS", default_value = "7")]
    window_days: i64,

    /// Number of highlights in a reflection
    #[arg(long, default_value = "3")]
    highlights: usize,

    /// Hours east of UTC used to group memories by date
    #[arg(long, env = "ECHOMIND_UTC_OFFSET", default_value = "0", allow_hyphen_values = true)]
    utc_offset_hours: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,echomind=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = ReflectionConfig::builder()
        .window_days(args.window_days)
        .highlight_limit(args.highlights)
        .utc_offset_hours(args.utc_offset_hours)
        .build()?;

    tracing::info!(
        window_days = args.window_days,
        highlights = args.highlights,
        "Starting EchoMind session"
    );
    let state = AppState::new(Journal::with_config(config));

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("EchoMind server listening on {}", args.addr);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
