// Credential endpoints - the "Connect Notion" dialog
use super::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct SaveCredentialRequest {
    pub token: String,
}

pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let status = state.connector.read().status();
    HttpResponse::Ok().json(status)
}

pub async fn save(
    state: web::Data<AppState>,
    body: web::Json<SaveCredentialRequest>,
) -> HttpResponse {
    let token = body.into_inner().token;
    let connector = state.connector.clone();
    // Saving writes the credential file.
    let saved = web::block(move || {
        let mut connector = connector.write();
        connector.set_input(token);
        connector.save().then(|| connector.status())
    })
    .await;

    match saved {
        Ok(Some(status)) => {
            info!(slot = %status.slot, "Notion credential updated from UI");
            HttpResponse::Ok().json(status)
        }
        Ok(None) => HttpResponse::BadRequest().json(json!({ "error": "Token cannot be empty" })),
        Err(e) => {
            error!("❌ Credential save task failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save credential" }))
        }
    }
}

pub async fn clear(state: web::Data<AppState>) -> HttpResponse {
    let connector = state.connector.clone();
    let cleared = web::block(move || {
        let mut connector = connector.write();
        connector.clear();
        connector.status()
    })
    .await;

    match cleared {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(e) => {
            error!("❌ Credential clear task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to clear credential" }))
        }
    }
}
