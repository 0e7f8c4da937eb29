// Tool endpoints - list and run Notion tools for the chat runtime
use super::AppState;
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use tracing::info;

pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "tools": state.registry.list_all_tools() }))
}

/// Tool failures are data: they come back as 200 with an error envelope.
pub async fn call(
    state: web::Data<AppState>,
    name: web::Path<String>,
    args: web::Json<Value>,
) -> HttpResponse {
    let name = name.into_inner();
    let credential = state.connector.read().credential();

    let Some(tool) = state.registry.bind(&name, credential) else {
        return HttpResponse::NotFound().json(json!({ "error": format!("Unknown tool: {name}") }));
    };

    info!(tool = %name, "🛠️ Tool call from chat UI");
    HttpResponse::Ok().json(tool.invoke(args.into_inner()).await)
}

#[cfg(test)]
mod tests {
    use crate::api::{configure, test_support};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn lists_all_tools_with_schemas() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state("http://127.0.0.1:9")))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/tools").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let tools = body["tools"].as_array().expect("tools");
        assert_eq!(tools.len(), 19);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[actix_web::test]
    async fn unknown_tool_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state("http://127.0.0.1:9")))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/tools/pages.teleport")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn runs_tool_with_saved_credential() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "user", "type": "bot"})))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_support::state(&server.uri());
        {
            let mut connector = state.connector.write();
            connector.set_input("secret_ui");
            connector.save();
        }
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tools/users.me")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "bot");
    }

    #[actix_web::test]
    async fn missing_credential_comes_back_as_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state(&server.uri())))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/tools/users.list")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().expect("error").contains("not configured"));
    }
}
