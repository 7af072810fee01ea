use crate::error::Error;
use hyper::{header, Body, Response, StatusCode};
use predictor_util::{err, error::Result};
use std::time::Duration;
use url::Url;

/// How long a health request may take before the service counts as unavailable. Discovery is best effort, so a silent service must not hold up the page. Predictions are not limited.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// A client for the model service that answers discovery and prediction requests.
pub struct Upstream {
	client: reqwest::Client,
	health_url: Url,
	predict_url: Url,
}

/// A response from the model service, read in full.
pub struct UpstreamResponse {
	pub status: StatusCode,
	pub content_type: Option<header::HeaderValue>,
	pub body: Vec<u8>,
}

impl Upstream {
	pub fn new(url: &Url, health_path: &str, predict_path: &str) -> Result<Upstream> {
		if !matches!(url.scheme(), "http" | "https") {
			return Err(err!("the model service url must use http or https, got {}", url));
		}
		Ok(Upstream {
			client: reqwest::Client::new(),
			health_url: url.join(health_path)?,
			predict_url: url.join(predict_path)?,
		})
	}

	pub async fn health(&self) -> Result<UpstreamResponse> {
		let request = self
			.client
			.get(self.health_url.clone())
			.timeout(HEALTH_TIMEOUT);
		send(request).await
	}

	/// Post a json body to the prediction endpoint.
	pub async fn predict(&self, body: Vec<u8>) -> Result<UpstreamResponse> {
		let request = self
			.client
			.post(self.predict_url.clone())
			.header(header::CONTENT_TYPE, "application/json")
			.body(body);
		send(request).await
	}
}

/// Failing to reach the model service, or to read its response, is reported as `Error::BadGateway`.
async fn send(request: reqwest::RequestBuilder) -> Result<UpstreamResponse> {
	let response = request.send().await.map_err(unavailable)?;
	let status = response.status();
	let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
	let body = response.bytes().await.map_err(unavailable)?.to_vec();
	Ok(UpstreamResponse {
		status,
		content_type,
		body,
	})
}

fn unavailable(error: reqwest::Error) -> Error {
	log::warn!("model service request failed: {}", error);
	Error::BadGateway {
		message: format!("model service unavailable: {}", error),
	}
}

impl UpstreamResponse {
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Relay the status, content type and body unchanged.
	pub fn into_response(self) -> Result<Response<Body>> {
		let mut response = Response::builder().status(self.status);
		if let Some(content_type) = self.content_type {
			response = response.header(header::CONTENT_TYPE, content_type);
		}
		Ok(response.body(Body::from(self.body))?)
	}
}

#[test]
fn test_upstream_urls() {
	let url: Url = "http://127.0.0.1:5000".parse().unwrap();
	let upstream = Upstream::new(&url, "/", "/predict").unwrap();
	assert_eq!(upstream.health_url.as_str(), "http://127.0.0.1:5000/");
	assert_eq!(upstream.predict_url.as_str(), "http://127.0.0.1:5000/predict");
	let url: Url = "ftp://127.0.0.1".parse().unwrap();
	assert!(Upstream::new(&url, "/", "/predict").is_err());
}
