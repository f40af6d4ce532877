//! Extractor for client metadata recorded in the view audit log.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::state::AppState;

/// Client IP address and user agent, taken from request headers.
///
/// The IP is read from `X-Forwarded-For` (first hop) falling back to
/// `X-Real-IP`; behind the expected reverse proxy that is the client
/// address. Absent headers simply yield `None` -- view records tolerate
/// missing metadata.
#[derive(Debug, Clone)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: String,
}

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.trim().to_string())
            })
            .filter(|v| !v.is_empty());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(ClientMeta {
            ip_address,
            user_agent,
        })
    }
}
