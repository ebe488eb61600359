//! Integration tests for the HTTP client against a mock backend.
//!
//! Exercises request shapes (paths, query params, auth header, JSON bodies)
//! and response mapping (decoding, status-to-error translation, backend
//! message extraction).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::NaiveDate;
use parkdeck_api::{
    AdminApi, ApiClient, ApiError, AuthApi, ListQuery, LoginRequest, ParkingApi,
    ReservationRequest, ReservationsApi, SpotStatus, StaticToken, Zone,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn anonymous_client(server: &MockServer) -> ApiClient<StaticToken> {
    ApiClient::new(server.uri(), StaticToken::anonymous())
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ============================================================================
// Auth
// ============================================================================

/// Login posts the credentials and decodes the session payload.
#[tokio::test]
async fn test_login_decodes_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "hunter2!",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "type": "Bearer",
            "userId": 7,
            "email": "admin@example.com",
            "firstName": "Ada",
            "lastName": "Admin",
            "role": "ADMIN",
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let session = client
        .login(&LoginRequest {
            email: "admin@example.com".to_string(),
            password: "hunter2!".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.user_id, 7);
    assert_eq!(session.authorization(), "Bearer jwt-abc");
    assert!(session.is_admin());
}

/// A 401 from the backend comes back as the dedicated variant, regardless
/// of the body.
#[tokio::test]
async fn test_unauthorized_status_maps_to_variant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let error = client
        .login(&LoginRequest {
            email: "user@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, ApiError::Unauthorized);
}

// ============================================================================
// Authorization header
// ============================================================================

/// The token provider's header value rides along on every request. The
/// mock only matches when the header is present, so a missing header
/// would surface as a 404 rejection.
#[tokio::test]
async fn test_token_attached_to_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/my-reservations"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), StaticToken::bearer("jwt-123"));
    let reservations = client.mine().await.unwrap();

    assert!(reservations.is_empty());
}

// ============================================================================
// Availability
// ============================================================================

/// The availability call sends the date as `YYYY-MM-DD` and decodes the
/// per-spot statuses, including the kebab-case ones.
#[tokio::test]
async fn test_spaces_sends_date_and_decodes_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/parking/spaces"))
        .and(query_param("date", "2025-03-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "spotNumber": 4, "parkingType": "YARD", "status": "available"},
            {"id": 2, "spotNumber": 9, "parkingType": "GARAGE", "status": "my-reservation"},
            {"id": 3, "spotNumber": 1, "parkingType": "GARAGE", "status": "owner-cancelled"},
        ])))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let spaces = client.spaces(date("2025-03-15")).await.unwrap();

    assert_eq!(spaces.len(), 3);
    assert_eq!(spaces[0].parking_type, Zone::Yard);
    assert_eq!(spaces[0].status, SpotStatus::Available);
    assert_eq!(spaces[1].status, SpotStatus::MyReservation);
    assert_eq!(spaces[2].status, SpotStatus::OwnerCancelled);
}

// ============================================================================
// Reservations
// ============================================================================

/// A conflicting booking surfaces the backend's message, not a generic one.
#[tokio::test]
async fn test_rejection_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Space already reserved",
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let error = client
        .create(&ReservationRequest {
            parking_space_id: 5,
            reservation_date: date("2025-03-15"),
        })
        .await
        .unwrap_err();

    assert_eq!(error.backend_message(), Some("Space already reserved"));
    assert_eq!(
        error,
        ApiError::Rejected {
            status: 409,
            message: "Space already reserved".to_string(),
        }
    );
}

// ============================================================================
// Admin lists
// ============================================================================

/// Paging params always go out, with an unset sort sent as an empty string.
#[tokio::test]
async fn test_admin_users_sends_paging_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(query_param("search", "smith"))
        .and(query_param("sort", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": 21,
                    "email": "jane.smith@example.com",
                    "firstName": "Jane",
                    "lastName": "Smith",
                    "isAdmin": false,
                    "parkingType": "OWNER",
                },
            ],
            "total": 37,
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let page = client
        .users(&ListQuery {
            page: 2,
            size: 10,
            search: "smith".to_string(),
            sort: None,
        })
        .await
        .unwrap();

    assert_eq!(page.total, 37);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].email, "jane.smith@example.com");
}

/// Backends that return a bare array instead of `{items, total}` still
/// decode, with the total inferred from the row count.
#[tokio::test]
async fn test_admin_list_tolerates_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "userEmail": "u@example.com", "spot": 12, "start": "2025-03-15", "end": "2025-03-15"},
        ])))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let page = client.reservations(&ListQuery::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].spot, 12);
}

/// Admin endpoints hit without the role come back as the dedicated variant.
#[tokio::test]
async fn test_forbidden_status_maps_to_variant() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/9"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let error = client.delete_user(9).await.unwrap_err();

    assert_eq!(error, ApiError::Forbidden);
}

/// Mutation endpoints only check the status; an empty 200 body is fine.
#[tokio::test]
async fn test_unit_endpoint_ignores_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/parkings/3/revoke"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    client.revoke_parking(3).await.unwrap();
}

// ============================================================================
// Transport failures
// ============================================================================

/// A connection failure maps to the transport variant rather than a
/// rejection.
#[tokio::test]
async fn test_connection_failure_is_transport() {
    // A dedicated (non-pooled) server is required here: pooled servers from
    // `MockServer::start()` keep their listener alive after drop, so the
    // port would answer 404 instead of refusing the connection.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(uri, StaticToken::anonymous());
    let error = client.mine().await.unwrap_err();

    assert!(matches!(error, ApiError::RequestFailed(_)));
    assert!(error.is_transport());
}
