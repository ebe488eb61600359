//! Parkdeck API client implementation

use crate::error::{ApiError, ApiResult};
use crate::providers::{AdminApi, AuthApi, OwnerApi, ParkingApi, ReservationsApi};
use crate::token::TokenProvider;
use crate::types::{
    AdminReservationRow, AdminUserRow, ListQuery, LoginRequest, OwnerCancellationRequest, Page,
    ParkingSpace, RegisterRequest, Reservation, ReservationRequest, Role, Session,
    SetAdminRequest, SetOwnerRequest, UpdateRoleRequest,
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::future::Future;

/// HTTP client for the Parkdeck backend
///
/// Implements every provider trait over REST. The `Authorization` header is
/// sourced from the injected [`TokenProvider`] on each request, so a login
/// that lands mid-flight is picked up by the next call.
#[derive(Clone)]
pub struct ApiClient<T> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenProvider> ApiClient<T> {
    /// Create a new client against `base_url` (scheme and host, no path)
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn apply_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.authorization() {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => {
                tracing::debug!("No session token, sending unauthenticated request");
                builder
            }
        }
    }

    /// Attach auth, send, and map the response status
    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = self
            .apply_auth(builder)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(status = status.as_u16(), "Backend rejected request");
        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(rejection(status.as_u16(), &body))
            }
        }
    }

    async fn decode<D: DeserializeOwned>(response: Response) -> ApiResult<D> {
        response
            .json::<D>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    fn list_params(query: &ListQuery) -> [(&'static str, String); 4] {
        [
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
            ("search", query.search.clone()),
            ("sort", query.sort.clone().unwrap_or_default()),
        ]
    }
}

/// Build a rejection error, extracting the backend message when the body
/// carries one as `{"message": ...}` or `{"error": ...}`
fn rejection(status: u16, body: &str) -> ApiError {
    let extracted = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });

    let message = match extracted {
        Some(message) => message,
        None if body.trim().is_empty() => format!("Request failed with status {status}"),
        None => body.trim().to_string(),
    };

    ApiError::Rejected { status, message }
}

impl<T: TokenProvider> AuthApi for ApiClient<T> {
    fn login(&self, request: &LoginRequest) -> impl Future<Output = ApiResult<Session>> + Send {
        let builder = self.client.post(self.url("/api/auth/login")).json(request);
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = ApiResult<Session>> + Send {
        let builder = self
            .client
            .post(self.url("/api/auth/register"))
            .json(request);
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }
}

impl<T: TokenProvider> ParkingApi for ApiClient<T> {
    fn spaces(&self, date: NaiveDate) -> impl Future<Output = ApiResult<Vec<ParkingSpace>>> + Send {
        let builder = self
            .client
            .get(self.url("/api/parking/spaces"))
            .query(&[("date", date.to_string())]);
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }
}

impl<T: TokenProvider> ReservationsApi for ApiClient<T> {
    fn create(
        &self,
        request: &ReservationRequest,
    ) -> impl Future<Output = ApiResult<Reservation>> + Send {
        let builder = self.client.post(self.url("/api/reservations")).json(request);
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }

    fn cancel(&self, reservation_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .delete(self.url(&format!("/api/reservations/{reservation_id}")));
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn mine(&self) -> impl Future<Output = ApiResult<Vec<Reservation>>> + Send {
        let builder = self.client.get(self.url("/api/reservations/my-reservations"));
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }
}

impl<T: TokenProvider> OwnerApi for ApiClient<T> {
    fn cancel_availability(
        &self,
        request: &OwnerCancellationRequest,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self.client.post(self.url("/api/owner/cancel")).json(request);
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }
}

impl<T: TokenProvider> AdminApi for ApiClient<T> {
    fn users(&self, query: &ListQuery) -> impl Future<Output = ApiResult<Page<AdminUserRow>>> + Send {
        let builder = self
            .client
            .get(self.url("/api/admin/users"))
            .query(&Self::list_params(query));
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }

    fn reservations(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = ApiResult<Page<AdminReservationRow>>> + Send {
        let builder = self
            .client
            .get(self.url("/api/admin/reservations"))
            .query(&Self::list_params(query));
        async move {
            let response = self.send(builder).await?;
            Self::decode(response).await
        }
    }

    fn set_admin(&self, user_id: u64, is_admin: bool) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .post(self.url(&format!("/api/admin/users/{user_id}/admin")))
            .json(&SetAdminRequest { is_admin });
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn set_owner(
        &self,
        user_id: u64,
        make_owner: bool,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .post(self.url(&format!("/api/admin/users/{user_id}/owner")))
            .json(&SetOwnerRequest { make_owner });
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn update_role(&self, user_id: u64, role: Role) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .put(self.url(&format!("/api/admin/users/{user_id}/role")))
            .json(&UpdateRoleRequest { role });
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn delete_user(&self, user_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .delete(self.url(&format!("/api/admin/users/{user_id}")));
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn cancel_reservation(&self, reservation_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .delete(self.url(&format!("/api/admin/reservations/{reservation_id}")));
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }

    fn revoke_parking(&self, parking_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let builder = self
            .client
            .put(self.url(&format!("/api/admin/parkings/{parking_id}/revoke")))
            .json(&serde_json::json!({}));
        async move {
            self.send(builder).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::StaticToken;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/", StaticToken::anonymous());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.url("/api/reservations"), "http://localhost:8080/api/reservations");
    }

    #[test]
    fn test_rejection_extracts_message_field() {
        let error = rejection(409, r#"{"message": "Space already reserved"}"#);
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 409,
                message: "Space already reserved".to_string(),
            }
        );
    }

    #[test]
    fn test_rejection_extracts_error_field() {
        let error = rejection(400, r#"{"error": "Bad date"}"#);
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 400,
                message: "Bad date".to_string(),
            }
        );
    }

    #[test]
    fn test_rejection_falls_back_to_plain_body() {
        let error = rejection(500, "internal error");
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 500,
                message: "internal error".to_string(),
            }
        );
    }

    #[test]
    fn test_rejection_with_empty_body_names_status() {
        let error = rejection(502, "");
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 502,
                message: "Request failed with status 502".to_string(),
            }
        );
    }
}
