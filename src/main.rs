use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fursbliss::clock::SystemClock;
use fursbliss::config::Args;
use fursbliss::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();
    let quiz_rule = args.quiz_rule();

    let state = Arc::new(AppState::new(Arc::new(SystemClock), quiz_rule));
    let app = fursbliss::app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "FursBliss service listening");
    info!(
        limit = quiz_rule.limit,
        window_secs = args.quiz_rate_window,
        "quiz submission rate limit"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
