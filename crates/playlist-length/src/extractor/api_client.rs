use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::debug;

use crate::extractor::{default::DEFAULT_UA, error::PlaylistError};

/// Shared HTTP plumbing for API-backed sources.
///
/// Every request carries the client's default headers and the persistent query
/// parameters (e.g. the API key), so individual sources only add what is
/// specific to each call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    // name of the service, e.g. "YouTube"
    pub service_name: String,
    // base URL every endpoint is joined to
    pub base_url: String,
    pub client: Client,
    default_headers: HeaderMap,
    default_params: FxHashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl ApiClient {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        service_name: S1,
        base_url: S2,
        client: Client,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_UA),
        );
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        Self {
            service_name: service_name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            default_headers,
            default_params: FxHashMap::default(),
        }
    }

    /// Insert an arbitrary header, skipping invalid names or values.
    pub fn add_header_str<K: AsRef<str>, V: AsRef<str>>(&mut self, key: K, value: V) {
        match HeaderName::from_str(key.as_ref()) {
            Ok(name) => match HeaderValue::from_str(value.as_ref()) {
                Ok(value) => {
                    self.default_headers.insert(name, value);
                }
                Err(e) => {
                    debug!(error = %e, "Invalid header value; skipping");
                }
            },
            Err(e) => {
                debug!(error = %e, "Invalid header name; skipping");
            }
        }
    }

    pub fn add_param<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.default_params.insert(key.into(), value.into());
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.endpoint(path))
            .headers(self.default_headers.clone())
            .query(&self.default_params)
    }

    /// Sends the request and decodes a JSON body, mapping non-success statuses
    /// to [`PlaylistError::Api`] using the service's error envelope when present.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, PlaylistError> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response, PlaylistError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        debug!(status = status.as_u16(), %message, "api request failed");
        Err(PlaylistError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::default::default_client;

    #[test]
    fn test_endpoint_joins_paths() {
        let api = ApiClient::new("Test", "https://example.com/api/", default_client().unwrap());
        assert_eq!(api.endpoint("videos"), "https://example.com/api/videos");
        assert_eq!(api.endpoint("/videos"), "https://example.com/api/videos");
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let mut api = ApiClient::new("Test", "https://example.com", default_client().unwrap());
        api.add_header_str("bad header", "value");
        api.add_header_str("x-good", "value");

        let request = api.get("videos").build().unwrap();
        assert_eq!(request.headers().get("x-good").unwrap(), "value");
        assert_eq!(request.headers().len(), 3);
    }

    #[test]
    fn test_default_params_are_sent() {
        let mut api = ApiClient::new("Test", "https://example.com", default_client().unwrap());
        api.add_param("key", "secret");

        let request = api.get("videos").query(&[("id", "abc")]).build().unwrap();
        let query = request.url().query().unwrap_or_default();
        assert!(query.contains("key=secret"));
        assert!(query.contains("id=abc"));
    }

    #[test]
    fn test_default_user_agent_names_the_crate() {
        let api = ApiClient::new("Test", "https://example.com", default_client().unwrap());
        let request = api.get("videos").build().unwrap();
        let user_agent = request
            .headers()
            .get(reqwest::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(user_agent, concat!("playlist-length/", env!("CARGO_PKG_VERSION")));
    }
}
