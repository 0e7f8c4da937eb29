// Notion Tools Service Entry Point
// Serves the Notion tools to AI agents over MCP (stdio) and to the web
// chat UI over HTTP, sharing one credential connector between the two.
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use notion_tools::{
    api::{self, AppState},
    credentials::{CredentialConnector, FileCredentialStore},
    McpServer, NotionClient, NotionToolsConfig, ToolRegistry,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout carries MCP traffic, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Starting Notion tools service");

    let config = NotionToolsConfig::from_env()?;

    let client = NotionClient::new(&config.notion_api_base, &config.notion_version);
    let registry = Arc::new(ToolRegistry::new(client));

    let store = Arc::new(FileCredentialStore::new(&config.credential_file));
    info!(path = %store.path().display(), slot = %config.credential_slot, "Credential store ready");
    let connector = CredentialConnector::new(store, config.credential_slot.clone())
        .with_fallback(config.fallback_token.clone());
    info!(configured = connector.is_configured(), "Notion credential state loaded");
    let connector = Arc::new(RwLock::new(connector));

    if config.mcp_stdio {
        let server = McpServer::new(registry.clone(), connector.clone());
        tokio::spawn(async move {
            match server.run().await {
                Ok(_) => tracing::warn!("MCP server finished"),
                Err(e) => tracing::error!("MCP server error: {}", e),
            }
        });
    }

    let state = AppState::new(registry, connector);
    let cors_origin = config.cors_allowed_origin.clone();

    info!("🚀 HTTP API listening on http://{}:{}", config.host, config.service_port);
    info!("   MCP Protocol: {}", if config.mcp_stdio { "stdio" } else { "disabled" });

    // Keep running as long as the HTTP server is alive, even if the stdio
    // client goes away.
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.service_port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.service_port))?
    .run()
    .await
    .context("HTTP server failed")?;

    Ok(())
}
