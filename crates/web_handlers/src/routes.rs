use actix_web::{guard, web};

use crate::campground_handlers::*;
use crate::error::{form_error_handler, not_found};
use crate::review_handlers::*;

/// A route answering `GET` and `HEAD`. The server drops the body of `HEAD` responses.
fn get_or_head() -> actix_web::Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}

/// Registers every route of the application.
///
/// The caller provides the store as `web::Data<dyn CampgroundStore>`, wraps the
/// app in [`MethodOverride`](crate::MethodOverride) and sets [`not_found`] as
/// the app's default service.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(
            web::resource("/")
                .route(get_or_head().to(index))
                .default_service(web::to(not_found)),
        )
        .service(
            web::resource("/health")
                .route(get_or_head().to(health))
                .default_service(web::to(not_found)),
        )
        .service(
            web::resource("/campgrounds")
                .route(get_or_head().to(list_campgrounds))
                .route(web::post().to(create_campground))
                .default_service(web::to(not_found)),
        )
        // Registered before `/campgrounds/{id}` so "new" is not taken as an id
        .service(
            web::resource("/campgrounds/new")
                .route(get_or_head().to(new_campground_form))
                .default_service(web::to(not_found)),
        )
        .service(
            web::resource("/campgrounds/{id}")
                .route(get_or_head().to(show_campground))
                .route(web::patch().to(update_campground))
                .route(web::put().to(update_campground))
                .route(web::delete().to(delete_campground))
                .default_service(web::to(not_found)),
        )
        .service(
            web::resource("/campgrounds/{id}/edit")
                .route(get_or_head().to(edit_campground_form))
                .default_service(web::to(not_found)),
        )
        .service(
            web::resource("/campgrounds/{id}/reviews")
                .route(web::post().to(create_review))
                .default_service(web::to(not_found)),
        );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{Method, StatusCode, header};
    use actix_web::{App, test};
    use campground_store::{CampgroundStore, MemoryCampgroundStore, NewCampground};

    use super::*;
    use crate::MethodOverride;

    const FORM: &str = "application/x-www-form-urlencoded";

    fn new_campground(title: &str) -> NewCampground {
        NewCampground {
            title: title.to_string(),
            location: "Moab, Utah".to_string(),
            image: "https://example.com/camp.jpg".to_string(),
            price: 30.0,
            description: "Red rocks".to_string(),
        }
    }

    fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    macro_rules! init_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($store.clone() as Arc<dyn CampgroundStore>))
                    .wrap(MethodOverride)
                    .configure(configure_routes)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_root_redirects_to_list() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/campgrounds");
    }

    #[actix_web::test]
    async fn test_list_renders_every_campground() {
        let store = Arc::new(MemoryCampgroundStore::new());
        store.insert(&new_campground("Alpha Camp")).await.unwrap();
        store.insert(&new_campground("Beta Camp")).await.unwrap();
        let app = init_app!(store);

        let req = test::TestRequest::get().uri("/campgrounds").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("Alpha Camp"));
        assert!(html.contains("Beta Camp"));
    }

    #[actix_web::test]
    async fn test_new_form_renders() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::get().uri("/campgrounds/new").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_create_persists_and_redirects() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload(
                "campground%5Btitle%5D=Misty+Bay&campground%5Blocation%5D=Tucson%2C+Arizona\
                 &campground%5Bimage%5D=https%3A%2F%2Fexample.com%2Fc.jpg\
                 &campground%5Bprice%5D=12&campground%5Bdescription%5D=Shady",
            )
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/campgrounds");

        let stored = store.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Misty Bay");
        assert_eq!(stored[0].location, "Tucson, Arizona");
        assert_eq!(stored[0].price, 12.0);
    }

    #[actix_web::test]
    async fn test_create_with_invalid_payload_persists_nothing() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("title=Misty+Bay&image=x&price=-4&description=Shady")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("&quot;location&quot; is required"));
        assert!(html.contains("&quot;price&quot; must be greater than or equal to 0"));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_create_without_form_content_type_is_rejected() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .set_payload("title=Misty+Bay&location=Moab&image=x&price=3&description=Red")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Invalid form data"));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_head_is_answered_like_get() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);

        for uri in [
            "/campgrounds".to_string(),
            "/campgrounds/new".to_string(),
            format!("/campgrounds/{}", created.id),
            format!("/campgrounds/{}/edit", created.id),
            "/health".to_string(),
        ] {
            let req = test::TestRequest::default()
                .method(Method::HEAD)
                .uri(&uri)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "HEAD {uri}");
        }
    }

    #[actix_web::test]
    async fn test_show_unknown_or_malformed_id_is_not_found() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let uri = format!("/campgrounds/{}", uuid::Uuid::new_v4());
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/campgrounds/not-an-id/edit")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_edit_form_is_prefilled() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);

        let req = test::TestRequest::get()
            .uri(&format!("/campgrounds/{}/edit", created.id))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("value=\"Alpha Camp\""));
    }

    #[actix_web::test]
    async fn test_update_through_method_override() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/campgrounds/{}?_method=PATCH", created.id))
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("title=Renamed&location=Moab%2C+Utah&image=x&price=45&description=Red")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/campgrounds/{}", created.id));

        let updated = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.price, 45.0);
        assert_eq!(updated.id, created.id);
    }

    #[actix_web::test]
    async fn test_update_with_invalid_payload_changes_nothing() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/campgrounds/{}?_method=PATCH", created.id))
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("title=&location=Moab&image=x&price=-1&description=Red")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("&quot;title&quot; is not allowed to be empty"));

        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[actix_web::test]
    async fn test_update_missing_campground_is_not_found() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/campgrounds/{}", uuid::Uuid::new_v4()))
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("title=Renamed&location=Moab&image=x&price=45&description=Red")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);
        let uri = format!("/campgrounds/{}?_method=DELETE", created.id);

        for _ in 0..2 {
            let req = test::TestRequest::post().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(location(&resp), "/campgrounds");
        }
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_create_review_appends_one_reference() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let created = store.insert(&new_campground("Alpha Camp")).await.unwrap();
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/campgrounds/{}/reviews", created.id))
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("review%5Bbody%5D=Lovely+views&review%5Brating%5D=5")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/campgrounds/{}", created.id));

        let campground = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(campground.reviews.len(), 1);

        let reviews = store.find_reviews(&created.id).await.unwrap();
        assert_eq!(reviews[0].id, campground.reviews[0]);
        assert_eq!(reviews[0].body.as_deref(), Some("Lovely views"));
        assert_eq!(reviews[0].rating, Some(5.0));

        let req = test::TestRequest::get()
            .uri(&format!("/campgrounds/{}", created.id))
            .to_request();
        let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("Lovely views"));
    }

    #[actix_web::test]
    async fn test_review_for_missing_campground_is_not_found() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/campgrounds/{}/reviews", uuid::Uuid::new_v4()))
            .insert_header((header::CONTENT_TYPE, FORM))
            .set_payload("review%5Bbody%5D=Hello")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unmatched_routes_are_not_found() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let requests = vec![
            test::TestRequest::get().uri("/nowhere").to_request(),
            test::TestRequest::delete().uri("/campgrounds").to_request(),
            test::TestRequest::post().uri("/").to_request(),
            test::TestRequest::post().uri("/campgrounds/new").to_request(),
            test::TestRequest::get()
                .uri("/campgrounds/some/deeper/path")
                .to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
            assert!(html.contains("Page not found!"));
        }
    }

    #[actix_web::test]
    async fn test_health() {
        let store = Arc::new(MemoryCampgroundStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "OK");
    }
}
