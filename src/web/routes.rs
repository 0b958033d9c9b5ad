use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::application::AccountService;
use crate::infrastructure::AppConfig;
use crate::web::handlers::*;

pub fn create_router(service: Arc<AccountService>, config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/api/create", post(create_account))
        .route("/api/fetch", get(fetch_account_details))
        .route("/api/update", put(update_account_details))
        .route("/api/delete", delete(delete_account))
        .route("/api/build-info", get(build_info))
        .route("/api/contact-info", get(contact_info))
        .route("/health", get(health_check))
        .with_state((service, config))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, Customer, DEFAULT_ACCOUNT_TYPE, DEFAULT_BRANCH_ADDRESS};
    use crate::infrastructure::repository::MockAccountRepositoryTrait;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn customer_fixture() -> Customer {
        Customer {
            customer_id: 7,
            name: "John Doe".to_string(),
            email: "jdoe@email.com".to_string(),
            mobile_number: "1234567899".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn account_fixture() -> Account {
        Account {
            account_number: 1_234_567_890,
            customer_id: 7,
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
            branch_address: DEFAULT_BRANCH_ADDRESS.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn test_app(repo: MockAccountRepositoryTrait) -> Router {
        create_router(
            Arc::new(AccountService::new(Arc::new(repo))),
            Arc::new(AppConfig::default()),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_the_success_envelope() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_customer_by_mobile_number()
            .returning(|_| Ok(None));
        repo.expect_create_customer_with_account()
            .returning(|_, _| Ok((customer_fixture(), account_fixture())));

        let payload = json!({
            "name": "John Doe",
            "email": "jdoe@email.com",
            "mobileNumber": "1234567899"
        });
        let response = test_app(repo)
            .oneshot(json_request("POST", "/api/create", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "201");
        assert_eq!(body["statusMsg"], "Account created successfully");
    }

    #[tokio::test]
    async fn create_with_a_registered_mobile_number_returns_500() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_customer_by_mobile_number()
            .returning(|_| Ok(Some(customer_fixture())));

        let payload = json!({
            "name": "John Doe",
            "email": "jdoe@email.com",
            "mobileNumber": "1234567899"
        });
        let response = test_app(repo)
            .oneshot(json_request("POST", "/api/create", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["apiPath"], "/api/create");
        assert_eq!(body["errorCode"], 500);
        assert!(body["errorMessage"]
            .as_str()
            .unwrap()
            .contains("already registered"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_before_the_workflow_runs() {
        // No expectations: a repository call would panic the mock.
        let repo = MockAccountRepositoryTrait::new();

        let payload = json!({
            "name": "Jo",
            "email": "not-an-email",
            "mobileNumber": "12345"
        });
        let response = test_app(repo)
            .oneshot(json_request("POST", "/api/create", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errorCode"], 400);
    }

    #[tokio::test]
    async fn fetch_returns_the_combined_customer_account_json() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_customer_by_mobile_number()
            .returning(|_| Ok(Some(customer_fixture())));
        repo.expect_find_account_by_customer_id()
            .returning(|_| Ok(Some(account_fixture())));

        let response = test_app(repo)
            .oneshot(
                Request::builder()
                    .uri("/api/fetch?mobileNumber=1234567899")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["mobileNumber"], "1234567899");
        assert_eq!(body["accountsDto"]["accountType"], "Savings");
        assert_eq!(body["accountsDto"]["accountNumber"], 1_234_567_890);
    }

    #[tokio::test]
    async fn fetch_with_unknown_mobile_number_returns_500_not_found() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_customer_by_mobile_number()
            .returning(|_| Ok(None));

        let response = test_app(repo)
            .oneshot(
                Request::builder()
                    .uri("/api/fetch?mobileNumber=1234567899")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Customer not found"));
    }

    #[tokio::test]
    async fn fetch_rejects_a_malformed_mobile_number_param() {
        let repo = MockAccountRepositoryTrait::new();

        let response = test_app(repo)
            .oneshot(
                Request::builder()
                    .uri("/api/fetch?mobileNumber=12ab")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_without_account_payload_returns_417() {
        let repo = MockAccountRepositoryTrait::new();

        let payload = json!({
            "name": "John Doe",
            "email": "jdoe@email.com",
            "mobileNumber": "1234567899"
        });
        let response = test_app(repo)
            .oneshot(json_request("PUT", "/api/update", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::EXPECTATION_FAILED);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "417");
    }

    #[tokio::test]
    async fn update_with_account_payload_returns_200() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_account_by_number()
            .returning(|_| Ok(Some(account_fixture())));
        repo.expect_find_customer_by_id()
            .returning(|_| Ok(Some(customer_fixture())));
        repo.expect_update_customer_and_account()
            .returning(|_, _| Ok(()));

        let payload = json!({
            "name": "John Doe",
            "email": "jdoe@email.com",
            "mobileNumber": "1234567899",
            "accountsDto": {
                "accountNumber": 1_234_567_890i64,
                "accountType": "Current",
                "branchAddress": "456 Side Street, Boston"
            }
        });
        let response = test_app(repo)
            .oneshot(json_request("PUT", "/api/update", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "200");
    }

    #[tokio::test]
    async fn delete_returns_200_after_removing_the_pair() {
        let mut repo = MockAccountRepositoryTrait::new();
        repo.expect_find_customer_by_mobile_number()
            .returning(|_| Ok(Some(customer_fixture())));
        repo.expect_delete_customer_and_account()
            .returning(|_| Ok(()));

        let response = test_app(repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/delete?mobileNumber=1234567899")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "200");
    }

    #[tokio::test]
    async fn build_info_reports_the_configured_version() {
        let response = test_app(MockAccountRepositoryTrait::new())
            .oneshot(
                Request::builder()
                    .uri("/api/build-info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Current Build Version:"));
    }

    #[tokio::test]
    async fn contact_info_serves_the_configured_block() {
        let response = test_app(MockAccountRepositoryTrait::new())
            .oneshot(
                Request::builder()
                    .uri("/api/contact-info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("accounts"));
        assert!(body["contactDetails"].is_object());
    }

    #[tokio::test]
    async fn health_endpoint_is_up() {
        let response = test_app(MockAccountRepositoryTrait::new())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
