//! Helpers for talking to the backend.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::system::auth::storage;

/// Backend base URL: same host as the page, port 3000.
/// Empty string when there is no window (tests).
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
    format!("{}//{}:3000", protocol, hostname)
}

/// `api_base()` + `path` (path starts with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path segment escaped for use in a URL, e.g. a genre name
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Attach the stored access token, if any
fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// JSON error bodies the backend sends (`{"error": "...", ...}`)
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// User-facing message for a failed response
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    if body.trim().is_empty() {
        format!("HTTP error: {}", status)
    } else {
        format!("HTTP error {}: {}", status, body)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(response.status(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET `path`, sending the access token when signed in
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// POST `body` as JSON to `path`
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// PUT `body` as JSON to `path`
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// POST without a body (toggles)
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::post(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}
