use reqwest::Client;
use rustls::{ClientConfig, crypto::ring};
use rustls_platform_verifier::BuilderVerifierExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::error::PlaylistError;

pub(crate) const DEFAULT_UA: &str = concat!("playlist-length/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn default_client() -> Result<Client, PlaylistError> {
    create_client(None, DEFAULT_TIMEOUT)
}

pub fn create_client(
    proxy_config: Option<ProxyConfig>,
    timeout: Duration,
) -> Result<Client, PlaylistError> {
    let provider = Arc::new(ring::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| PlaylistError::Other(format!("failed to configure TLS versions: {e}")))?
        .with_platform_verifier()
        .map_err(|e| PlaylistError::Other(format!("failed to load platform verifier: {e}")))?
        .with_no_client_auth();

    let mut builder = Client::builder()
        .use_preconfigured_tls(tls_config)
        .timeout(timeout);

    if let Some(config) = proxy_config {
        match reqwest::Proxy::all(&config.url) {
            Ok(mut proxy) => {
                if let (Some(username), Some(password)) = (config.username, config.password) {
                    proxy = proxy.basic_auth(&username, &password);
                }
                builder = builder.proxy(proxy);
            }
            Err(e) => {
                warn!(proxy = %config.url, error = %e, "Failed to configure proxy; continuing without it");
            }
        }
    }

    Ok(builder.build()?)
}
