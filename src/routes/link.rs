use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};
use log::warn;

use crate::{
    errors::AppError,
    handlers::{create_rotated_links_handler, get_link_details_handler, save_link_handler},
};

// Malformed bodies get the same `{"error": ...}` shape as every other failure
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON body on {}: {}", req.path(), err);
    AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected query string on {}: {}", req.path(), err);
    AppError::Validation(format!("Invalid query string: {}", err)).into()
}

// Configure all link routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/save-link", web::post().to(save_link_handler))
            .route("/get-link-details", web::get().to(get_link_details_handler))
            .route(
                "/create-rotated-links",
                web::post().to(create_rotated_links_handler),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        handlers::LinkServiceType,
        models::{NewLink, LINK_TYPE_VIDEO},
        repositories::{LinkRepository, MemoryLinkRepository},
        services::LinkService,
        utils::id_generator::is_well_formed,
    };

    fn service_for(repo: Arc<MemoryLinkRepository>) -> web::Data<LinkServiceType> {
        let repo: Arc<dyn LinkRepository> = repo;
        web::Data::new(LinkService::new(repo))
    }

    #[actix_web::test]
    async fn test_save_and_get_link_details() {
        let repo = Arc::new(MemoryLinkRepository::new());
        let app = test::init_service(
            App::new()
                .app_data(service_for(repo))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/save-link")
            .set_json(json!({ "destinationUrl": "https://example.com/v/1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["id"].as_str().unwrap().to_string();
        assert!(is_well_formed(&id));

        let req = test::TestRequest::get()
            .uri(&format!("/api/get-link-details?id={}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "url": "https://example.com/v/1", "type": "video" }));
    }

    #[actix_web::test]
    async fn test_save_link_without_destination_is_bad_request() {
        let repo = Arc::new(MemoryLinkRepository::new());
        let app = test::init_service(
            App::new()
                .app_data(service_for(repo.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/save-link")
            .set_json(json!({ "type": "video" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "destinationUrl required" }));
        assert_eq!(repo.len(), 0);
    }

    #[actix_web::test]
    async fn test_malformed_body_keeps_error_shape() {
        let app = test::init_service(
            App::new()
                .app_data(service_for(Arc::new(MemoryLinkRepository::new())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/create-rotated-links")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"videoCount\": \"many\"}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn test_get_link_details_status_codes() {
        let app = test::init_service(
            App::new()
                .app_data(service_for(Arc::new(MemoryLinkRepository::new())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/get-link-details")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "ID required" }));

        let req = test::TestRequest::get()
            .uri("/api/get-link-details?id=missing01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Link not found" }));
    }

    #[actix_web::test]
    async fn test_create_rotated_links() {
        let repo = Arc::new(MemoryLinkRepository::new());
        for i in 0..3 {
            repo.insert(&NewLink {
                short_id: format!("vid{:06}", i),
                destination_url: format!("https://videos.example/{}", i),
                link_type: LINK_TYPE_VIDEO.to_string(),
            })
            .await
            .unwrap();
        }
        let app = test::init_service(
            App::new()
                .app_data(service_for(repo.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/create-rotated-links")
            .set_json(json!({ "adsterraLinks": ["urlA", "urlB"], "videoCount": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ids"].as_array().unwrap().len(), 4);
        assert_eq!(repo.len(), 5);
    }

    #[actix_web::test]
    async fn test_create_rotated_links_defaults() {
        let repo = Arc::new(MemoryLinkRepository::new());
        for i in 0..6 {
            repo.insert(&NewLink {
                short_id: format!("vid{:06}", i),
                destination_url: format!("https://videos.example/{}", i),
                link_type: LINK_TYPE_VIDEO.to_string(),
            })
            .await
            .unwrap();
        }
        let app = test::init_service(
            App::new()
                .app_data(service_for(repo.clone()))
                .configure(configure_routes),
        )
        .await;

        // No ads, four videos by default
        let req = test::TestRequest::post()
            .uri("/api/create-rotated-links")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ids"].as_array().unwrap().len(), 4);
        assert_eq!(repo.len(), 6);
    }
}
