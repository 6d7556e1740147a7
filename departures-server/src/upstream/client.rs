//! Departures API HTTP client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::DeparturesResponse;

use super::error::UpstreamError;

/// Marker replaced by the site identifier in the URL template.
pub const SITE_ID_PLACEHOLDER: &str = "{siteId}";

/// Default URL template for the provider's departures endpoint.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://transport.integration.sl.se/v1/sites/{siteId}/departures";

/// Default timeout for a single upstream request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// URL with a `{siteId}` placeholder
    pub url_template: String,
    /// Deadline for the whole request, body included
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Create a config pointing at the production provider.
    pub fn new() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom URL template (for testing against a stub).
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Departures API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url_template: String,
}

impl UpstreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            url_template: config.url_template,
        })
    }

    /// The provider URL for a site.
    ///
    /// The identifier is substituted verbatim; it is opaque to this service.
    pub fn site_url(&self, site_id: &str) -> String {
        self.url_template.replace(SITE_ID_PLACEHOLDER, site_id)
    }

    /// Fetch the departures currently listed for a site.
    ///
    /// The HTTP status is not inspected: a provider error page fails to
    /// decode and is reported as [`UpstreamError::Json`].
    pub async fn fetch_departures(
        &self,
        site_id: &str,
    ) -> Result<DeparturesResponse, UpstreamError> {
        let url = self.site_url(site_id);
        debug!(%url, "fetching departures");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "upstream request failed");
            UpstreamError::Request(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(UpstreamError::Body)?;

        serde_json::from_str(&body).map_err(|e| {
            let err = UpstreamError::json(&e, &body);
            warn!(
                %url,
                %status,
                error = %e,
                body = err.body_excerpt().unwrap_or_default(),
                "upstream returned an undecodable body"
            );
            err
        })
    }
}
