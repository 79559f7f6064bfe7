//! Request extractors shared by the ingestion handlers.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Body extractor accepting JSON or a urlencoded form post.
///
/// An empty body deserialises to `T::default()` so a bare `POST` behaves like
/// `{}`. A body that fails to parse is a 400.
#[derive(Debug, Clone, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Like [`JsonOrForm`] but never rejects: a body that cannot be read or
/// parsed becomes `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct LenientJsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for LenientJsonOrForm<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match JsonOrForm::<T>::from_request(req, state).await {
            Ok(JsonOrForm(value)) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable body, using defaults");
                Ok(Self(T::default()))
            }
        }
    }
}

/// The TCP peer address when the server was started with connect info.
///
/// Absent under `Router::oneshot` in tests unless a [`ConnectInfo`]
/// extension is inserted by hand.
#[derive(Debug, Clone, Copy)]
pub struct MaybeConnectInfo(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for MaybeConnectInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
        ))
    }
}

/// Client IP: first `X-Forwarded-For` hop, else the peer address.
///
/// Returns `None` when neither is available.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// `User-Agent` header, or `""` when absent or not valid text.
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
