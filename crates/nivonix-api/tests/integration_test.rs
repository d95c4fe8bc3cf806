use axum::http::StatusCode;
use axum::response::IntoResponse;

use nivonix_api::error::ApiError;
use nivonix_chat::TurnError;
use nivonix_llm::ProviderError;
use nivonix_persist::PersistError;

#[tokio::test]
async fn test_unauthenticated_maps_to_401() {
    let response = ApiError::Unauthenticated.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    let response = ApiError::BadRequest("missing fields".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_thread_not_found_maps_to_404() {
    let response = ApiError::ThreadNotFound("t1".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The persistence-level variant takes the same route.
    let response = ApiError::Persist(PersistError::ThreadNotFound("t1".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_provider_error_maps_to_502() {
    let response = ApiError::Provider(ProviderError::Api {
        status: 500,
        detail: "upstream".to_string(),
    })
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_store_unavailable_maps_to_503() {
    let response = ApiError::StoreUnavailable("down".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_turn_errors_convert_to_matching_api_errors() {
    let bad: ApiError = TurnError::BadRequest("empty".to_string()).into();
    assert!(matches!(bad, ApiError::BadRequest(_)));

    let provider: ApiError = TurnError::Provider(ProviderError::Timeout(60)).into();
    assert!(matches!(provider, ApiError::Provider(_)));

    let store: ApiError = TurnError::StoreUnavailable("down".to_string()).into();
    assert!(matches!(store, ApiError::StoreUnavailable(_)));
}
