//! Helpers for calling the POS service.

use crate::shared::config::API_PORT;
use crate::shared::error::AppError;
use crate::system::auth::context::RequestContext;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Base URL of the POS service, derived from the page's own location.
///
/// Returns an empty string outside a browser window.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// POST a JSON body with the session's bearer token and decode the JSON reply.
///
/// Only transport-level problems are reported here; the caller inspects the
/// envelope's status block for logical failures.
pub async fn post_json<B, R>(path: &str, ctx: &RequestContext, body: &B) -> Result<R, AppError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let response = Request::post(&api_url(path))
        .header("Authorization", &ctx.bearer())
        .json(body)
        .map_err(|e| AppError::Transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to send request: {}", e)))?;

    if !response.ok() {
        return Err(AppError::Transport(format!(
            "{} returned HTTP {}",
            path,
            response.status()
        )));
    }

    response
        .json::<R>()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to parse response: {}", e)))
}
