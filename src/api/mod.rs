//! REST Client
//!
//! One `ApiClient` per request scope; endpoint wrappers are grouped by domain.

mod auth;
mod employee_logs;
mod items;
mod operations;
mod purchase_orders;
mod suppliers;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use bizops_core::{ApiError, ApiResult};

/// Error body returned by the backend
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self { http: Client::new(), base_url: absolute_base(base_url), token }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode a JSON response
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.dispatch(builder).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and ignore the response body
    async fn send_empty(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.dispatch(builder).await.map(|_| ())
    }

    async fn dispatch(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request = builder.build().map_err(|e| ApiError::Network(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(event = "api.request", %method, %url);

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(event = "api.network_error", %method, %url, error = %e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.message,
            Err(_) if !text.trim().is_empty() => text,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };
        warn!(event = "api.error_status", %method, %url, status = status.as_u16(), message = %message);
        Err(ApiError::from_status(status.as_u16(), message))
    }
}

/// Fetch needs absolute URLs; a relative base is resolved against the page origin
fn absolute_base(base_url: &str) -> String {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        return base_url.to_string();
    }
    let origin = web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default();
    format!("{}/{}", origin.trim_end_matches('/'), base_url.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let api = ApiClient::new("https://ops.example.com/api/", None);
        assert_eq!(api.url("/suppliers"), "https://ops.example.com/api/suppliers");
        assert_eq!(api.url("operations/items/7"), "https://ops.example.com/api/operations/items/7");
    }

    #[test]
    fn test_absolute_base_is_kept() {
        assert_eq!(absolute_base("http://localhost:4000/api"), "http://localhost:4000/api");
    }
}
