//! Sorting visualizer server binary
//!
//! Usage: `sortvis [port] [array-size]`. Defaults come from `SORTVIS_*`
//! environment variables.

use sortvis::{Session, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?.with_args(std::env::args().skip(1))?;
    tracing::info!(
        algorithm = %config.algorithm,
        array_size = config.array_size,
        speed = config.speed.value(),
        "Starting sorting visualizer"
    );

    let session = Session::new(&config)?;
    VisServer::new(session).serve(config.addr).await?;

    Ok(())
}
