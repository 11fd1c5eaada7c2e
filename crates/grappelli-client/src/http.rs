//! HTTP-backed data source
//!
//! A thin wrapper over `reqwest` that joins composed request paths to a
//! base URL, forwards the merged query parameters, and maps transport,
//! status and decode failures into [`SourceError`].

use std::time::Duration;

use async_trait::async_trait;
use grappelli_core::query::ListRequest;
use serde_json::Value;
use url::Url;

use crate::envelope::ListEnvelope;
use crate::source::{DataSource, SourceError, SourceResult};

/// Builder for [`HttpSource`]
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use grappelli_client::http::HttpSourceBuilder;
///
/// let source = HttpSourceBuilder::new("http://localhost:8080/api")
///     .timeout(Duration::from_secs(30))
///     .bearer_token("secret")
///     .build()
///     .unwrap();
/// # let _ = source;
/// ```
pub struct HttpSourceBuilder {
	base_url: String,
	timeout: Option<Duration>,
	bearer_token: Option<String>,
}

impl HttpSourceBuilder {
	/// Creates a builder for the given base URL
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			timeout: None,
			bearer_token: None,
		}
	}

	/// Sets the request timeout
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Sets a bearer token attached to every request
	pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
		self.bearer_token = Some(token.into());
		self
	}

	/// Builds the source, validating the base URL
	pub fn build(self) -> SourceResult<HttpSource> {
		Url::parse(&self.base_url)
			.map_err(|e| SourceError::Url(format!("{}: {}", self.base_url, e)))?;
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder.build()?;
		Ok(HttpSource {
			client,
			base_url: self.base_url.trim_end_matches('/').to_string(),
			bearer_token: self.bearer_token,
		})
	}
}

/// A [`DataSource`] backed by a remote HTTP endpoint
pub struct HttpSource {
	client: reqwest::Client,
	base_url: String,
	bearer_token: Option<String>,
}

impl HttpSource {
	/// Creates a source with default client settings
	pub fn new(base_url: impl Into<String>) -> SourceResult<Self> {
		HttpSourceBuilder::new(base_url).build()
	}

	fn url_for(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

#[async_trait]
impl DataSource for HttpSource {
	async fn fetch(&self, request: &ListRequest) -> SourceResult<ListEnvelope> {
		let url = self.url_for(&request.path);
		tracing::debug!(url = %url, params = request.params.len(), "issuing list fetch");

		let mut builder = self.client.get(&url).query(&request.params);
		if let Some(token) = &self.bearer_token {
			builder = builder.bearer_auth(token);
		}
		let response = builder.send().await?;
		let status = response.status();
		if !status.is_success() {
			tracing::warn!(url = %url, status = status.as_u16(), "list fetch rejected");
			return Err(SourceError::Status {
				status: status.as_u16(),
				url,
			});
		}
		let bytes = response.bytes().await?;
		let body: Value = serde_json::from_slice(&bytes)?;
		Ok(ListEnvelope::from_value(body))
	}
}
