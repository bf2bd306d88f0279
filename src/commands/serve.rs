use anyhow::{Context, Result};
use std::sync::Arc;

use postcal::config::Config;
use postcal::engine::Engine;
use postcal::server::PostcalServer;

/// Start the HTTP API server
pub async fn serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    let engine = Engine::from_config(&config).context("Failed to create engine")?;
    let server = PostcalServer::new(Arc::new(engine), config.server.clone())
        .context("Failed to create server")?;
    let bind_address = server.bind_address();

    println!("Starting postcal API server");
    println!("===========================");
    println!("  Models: {}", config.llm.models.len());
    println!("  Default country: {}", config.holidays.default_country);
    println!(
        "  CORS: {}",
        if config.server.enable_cors { "enabled" } else { "disabled" }
    );
    println!(
        "  Request Logging: {}",
        if config.server.enable_request_logging {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();
    println!("API Endpoints:");
    println!("  GET  /api                             - Endpoint listing");
    println!("  GET  /api/health                      - Health check");
    println!("  GET  /api/countries                   - Available countries");
    println!("  GET  /api/holidays/{{year}}/{{country}}   - Holidays");
    println!("  GET  /api/model-status                - Model roster status");
    println!("  POST /api/reset-models                - Reset model failures");
    println!("  POST /api/generate                    - Generate a calendar");
    println!("  POST /api/improve-post                - Improve a post");
    println!("  GET  /metrics                         - Prometheus metrics endpoint");
    println!();
    println!("Listening on http://{bind_address}");
    println!("Press Ctrl+C to stop.\n");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Server stopped.");
    Ok(())
}
