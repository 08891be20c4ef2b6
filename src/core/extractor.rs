use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, ConnectInfo, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Client network identity used to key the tracking throttle.
/// Prefers the first X-Forwarded-For entry, then the peer address.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

/// Longest key kept from a forwarded header. Matches the width of the
/// tracking_attempts.client_key column.
const MAX_FORWARDED_KEY_LEN: usize = 64;

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let ip = match forwarded {
            Some(mut ip) => {
                // header values are ASCII, so the cut cannot split a character
                ip.truncate(MAX_FORWARDED_KEY_LEN);
                ip
            }
            None => parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        };

        Ok(ClientIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract_client_ip(req: Request<Body>) -> ClientIp {
        let (mut parts, _) = req.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_header() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 198.51.100.2")
            .body(Body::empty())
            .unwrap();

        let ip = extract_client_ip(req).await;
        assert_eq!(ip.0, "203.0.113.9");
    }

    #[tokio::test]
    async fn test_overlong_forwarded_entry_is_clipped_to_key_width() {
        let long_entry = "a".repeat(200);
        let req = Request::builder()
            .header("x-forwarded-for", format!("{}, 198.51.100.2", long_entry))
            .body(Body::empty())
            .unwrap();

        let ip = extract_client_ip(req).await;
        assert_eq!(ip.0.len(), MAX_FORWARDED_KEY_LEN);
        assert_eq!(ip.0, long_entry[..MAX_FORWARDED_KEY_LEN]);
    }

    #[tokio::test]
    async fn test_client_ip_falls_back_to_peer_address() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        let addr: SocketAddr = "192.0.2.7:54321".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));

        let ip = extract_client_ip(req).await;
        assert_eq!(ip.0, "192.0.2.7");
    }

    #[tokio::test]
    async fn test_client_ip_unknown_when_no_source() {
        let req = Request::builder().body(Body::empty()).unwrap();

        let ip = extract_client_ip(req).await;
        assert_eq!(ip.0, "unknown");
    }
}
