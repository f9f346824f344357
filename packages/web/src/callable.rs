//! Request and response envelopes for callable operations.
//!
//! Clients post `{"data": {...}}` and receive either `200 {"result": {...}}` or
//! an error body `{"error": {"status": "INVALID_ARGUMENT" | "INTERNAL", "message": ...}}`.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use api::ApiError;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const BAD_REQUEST: &str = "Bad Request";
const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Deserialize)]
struct CallableRequest {
    #[serde(default)]
    data: Value,
}

/// Extract the `data` member of a callable request body.
pub fn request_data(body: &[u8]) -> Result<Value, CallableError> {
    serde_json::from_slice::<CallableRequest>(body)
        .map(|request| request.data)
        .map_err(|_| CallableError(ApiError::InvalidArgument(BAD_REQUEST.to_string())))
}

/// Successful callable response.
#[derive(Serialize)]
pub struct Callable<T> {
    result: T,
}

impl<T> Callable<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

impl<T: Serialize> IntoResponse for Callable<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failed callable response.
#[derive(Debug)]
pub struct CallableError(pub ApiError);

impl From<ApiError> for CallableError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let code = self.0.code().replace('-', "_").to_uppercase();

        (
            status,
            Json(json!({
                "error": {
                    "status": code,
                    "message": self.0.message(),
                }
            })),
        )
            .into_response()
    }
}

/// Best-effort network address of the caller.
///
/// Uses the first `X-Forwarded-For` hop when the site sits behind a proxy and
/// that hop is an IP address, otherwise the TCP peer.
pub struct CallerAddress(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for CallerAddress {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|hop| hop.trim().parse::<IpAddr>().ok());

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(forwarded.or(peer).map(|ip| ip.to_string())))
    }
}
