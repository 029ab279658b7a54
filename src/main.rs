use blog_api::{Application, Config, ServerError};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_api=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = Config::from_env()?;
    let app = Application::start(&config).await?;

    info!("API Endpoints:");
    info!("  GET    /health           - Health check");
    info!("  GET    /posts?title=     - List posts");
    info!("  POST   /posts            - Create post");
    info!("  GET    /posts/:id        - Get specific post");
    info!("  PUT    /posts/:id        - Update post");
    info!("  DELETE /posts/:id        - Delete post");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    app.stop().await
}
