//! HTTP endpoints for the web chat front-end
//!
//! The browser uses these to manage the Notion credential and to run
//! tools on behalf of the model.

pub mod credentials;
pub mod tools;

use crate::{credentials::CredentialConnector, tools::ToolRegistry};
use actix_web::{web, HttpResponse};
use parking_lot::RwLock;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub connector: Arc<RwLock<CredentialConnector>>,
}

impl AppState {
    pub fn new(registry: Arc<ToolRegistry>, connector: Arc<RwLock<CredentialConnector>>) -> Self {
        Self {
            registry,
            connector,
        }
    }
}

/// Health check endpoint
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::resource("/api/credentials")
                .route(web::get().to(credentials::status))
                .route(web::put().to(credentials::save))
                .route(web::delete().to(credentials::clear)),
        )
        .route("/api/tools", web::get().to(tools::list))
        .route("/api/tools/{name}", web::post().to(tools::call));
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::notion::NotionClient;

    pub fn state(api_base: &str) -> AppState {
        let registry = Arc::new(ToolRegistry::new(NotionClient::new(api_base, "2022-06-28")));
        let connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), "notion_api_key");
        AppState::new(registry, Arc::new(RwLock::new(connector)))
    }
}
