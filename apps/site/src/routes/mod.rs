pub mod endpoints;
pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::content::handlers;
use crate::i18n::attach_locale;
use crate::render::pages;
use crate::state::AppState;

/// Site pages: home and the language switch.
fn main_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::handle_home))
        .route("/lang/:code", get(pages::handle_set_language))
}

/// Public resume view.
fn public_routes() -> Router<AppState> {
    Router::new().route("/resume", get(pages::handle_resume))
}

/// Content management, mounted under `/admin`.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sections",
            get(handlers::handle_list_sections).post(handlers::handle_create_section),
        )
        .route("/sections/order", put(handlers::handle_reorder_sections))
        .route(
            "/sections/:id",
            get(handlers::handle_get_section)
                .put(handlers::handle_update_section)
                .delete(handlers::handle_delete_section),
        )
        .route(
            "/settings",
            get(handlers::handle_get_settings).put(handlers::handle_update_settings),
        )
        .route(
            "/settings/:key",
            delete(handlers::handle_delete_setting),
        )
        .route("/builder", get(handlers::handle_get_builder))
        .route(
            "/builder/sections",
            post(handlers::handle_create_resume_section),
        )
        .route(
            "/builder/sections/:id",
            put(handlers::handle_update_resume_section)
                .delete(handlers::handle_delete_resume_section),
        )
        .route(
            "/builder/sections/:id/paragraphs",
            post(handlers::handle_create_paragraph),
        )
        .route(
            "/builder/paragraphs/:id",
            put(handlers::handle_update_paragraph).delete(handlers::handle_delete_paragraph),
        )
        .route(
            "/builder/paragraphs/:id/fields",
            post(handlers::handle_create_field),
        )
        .route(
            "/builder/fields/:id",
            put(handlers::handle_update_field).delete(handlers::handle_delete_field),
        )
        .route(
            "/navigation",
            get(handlers::handle_list_nav_links).post(handlers::handle_create_nav_link),
        )
        .route(
            "/navigation/:id",
            put(handlers::handle_update_nav_link).delete(handlers::handle_delete_nav_link),
        )
        .route(
            "/languages",
            get(handlers::handle_list_languages).post(handlers::handle_create_language),
        )
        .route(
            "/languages/:id",
            put(handlers::handle_update_language).delete(handlers::handle_delete_language),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(main_routes())
        .merge(public_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::from_fn_with_state(state.clone(), attach_locale))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::test_helpers::seeded_state;

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);
        let response = send(&app, get_req("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_home_carries_template_context() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(&app, get_req("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        assert_eq!(body["locale"], "de");
        assert_eq!(body["nav_links"].as_array().unwrap().len(), 5);
        assert_eq!(body["nav_links"][0]["label"], "Home");
        assert_eq!(body["nav_links"][0]["href"], "/");
        assert_eq!(body["langs"][0]["code"], "ar");
        assert_eq!(body["sections"].as_array().unwrap().len(), 9);
        assert_eq!(body["sections"][0]["title"], "Summary");
    }

    #[tokio::test]
    async fn test_locale_from_cookie_and_header() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, "lang=ar")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .body(Body::empty())
            .unwrap();
        let body = json_body(send(&app, request).await).await;
        assert_eq!(body["locale"], "ar");
        assert_eq!(body["direction"], "rtl");

        let request = Request::builder()
            .uri("/resume")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .body(Body::empty())
            .unwrap();
        let body = json_body(send(&app, request).await).await;
        assert_eq!(body["locale"], "en");
    }

    #[tokio::test]
    async fn test_set_language_sets_cookie() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(&app, get_req("/lang/en")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("lang=en;"));

        let response = send(&app, get_req("/lang/fr")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_section_lifecycle() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            json_req("POST", "/admin/sections", json!({ "title": "Publications" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["order"], 10);
        let id = created["id"].as_i64().unwrap();

        let response = send(
            &app,
            json_req(
                "PUT",
                &format!("/admin/sections/{id}"),
                json!({ "content": "Two papers" }),
            ),
        )
        .await;
        assert_eq!(json_body(response).await["content"], "Two papers");

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/admin/sections/{id}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::NO_CONTENT);

        let response = send(&app, get_req(&format!("/admin/sections/{id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_builder_and_public_resume() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let section = json_body(
            send(
                &app,
                json_req("POST", "/admin/builder/sections", json!({ "title": "Experience" })),
            )
            .await,
        )
        .await;
        let section_id = section["id"].as_i64().unwrap();

        let paragraph = json_body(
            send(
                &app,
                json_req(
                    "POST",
                    &format!("/admin/builder/sections/{section_id}/paragraphs"),
                    json!({ "title": "Acme GmbH" }),
                ),
            )
            .await,
        )
        .await;
        let paragraph_id = paragraph["id"].as_i64().unwrap();

        let response = send(
            &app,
            json_req(
                "POST",
                &format!("/admin/builder/paragraphs/{paragraph_id}/fields"),
                json!({ "label": "Role", "value": "Engineer" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        send(
            &app,
            json_req("PUT", "/admin/settings", json!({ "theme": "dark" })),
        )
        .await;

        let body = json_body(send(&app, get_req("/resume")).await).await;
        assert_eq!(body["resume"][0]["title"], "Experience");
        assert_eq!(body["resume"][0]["paragraphs"][0]["fields"][0]["value"], "Engineer");
        assert_eq!(body["settings"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_duplicate_language_conflicts() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            json_req("POST", "/admin/languages", json!({ "code": "en", "name": "English" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_nav_link_with_unknown_endpoint_rejected() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            json_req(
                "POST",
                "/admin/navigation",
                json!({ "label": "Blog", "endpoint": "main.blog" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reorder_sections_route() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let listed = json_body(send(&app, get_req("/admin/sections")).await).await;
        let mut ids: Vec<i64> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        ids.reverse();

        let response = send(&app, json_req("PUT", "/admin/sections/order", json!(ids))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["id"].as_i64(), Some(ids[0]));
        assert_eq!(body[0]["order"], 1);
        assert_eq!(body[8]["title"], "Summary");

        let response = send(&app, json_req("PUT", "/admin/sections/order", json!([ids[0], 999]))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_locale_from_percent_encoded_query() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let request = Request::builder()
            .uri("/?lang=%61r")
            .header(header::COOKIE, "lang=en")
            .body(Body::empty())
            .unwrap();
        let body = json_body(send(&app, request).await).await;
        assert_eq!(body["locale"], "ar");
        assert_eq!(body["direction"], "rtl");
    }

    #[tokio::test]
    async fn test_set_language_listed_but_not_enabled() {
        let (_dir, state) = seeded_state().await;
        let app = build_router(state);

        let response = send(
            &app,
            json_req("POST", "/admin/languages", json!({ "code": "fr", "name": "French" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(send(&app, get_req("/")).await).await;
        let french = body["langs"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["code"] == "fr")
            .unwrap()
            .clone();
        assert_eq!(french["href"], Value::Null);
        assert_eq!(body["langs"][0]["href"], "/lang/ar");

        let response = send(&app, get_req("/lang/fr")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = json_body(response).await["error"]["message"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(message.contains("not enabled"));
    }
}
