use crate::{error::Error, Context};
use hyper::{header, Body, Request, Response, StatusCode};
use predictor_util::error::Result;

const STYLES: &str = include_str!("styles.css");

pub async fn styles(_context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/css; charset=utf-8")
		.body(Body::from(STYLES))?;
	Ok(response)
}

/// Serve a file from the client build directory.
pub async fn client_js(
	context: &Context,
	_request: Request<Body>,
	file_name: &str,
) -> Result<Response<Body>> {
	if file_name.is_empty() || file_name.starts_with('.') || file_name.contains('\\') {
		return Err(Error::NotFound.into());
	}
	let path = context.options.client_dir.join(file_name);
	let data = match tokio::fs::read(&path).await {
		Ok(data) => data,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			return Err(Error::NotFound.into())
		}
		Err(error) => return Err(error.into()),
	};
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, content_type(file_name))
		.body(Body::from(data))?;
	Ok(response)
}

fn content_type(file_name: &str) -> &'static str {
	match file_name.rsplit('.').next() {
		Some("js") => "text/javascript",
		Some("wasm") => "application/wasm",
		Some("ts") => "text/plain",
		_ => "application/octet-stream",
	}
}

#[test]
fn test_content_type() {
	assert_eq!(content_type("predictor_app_client.js"), "text/javascript");
	assert_eq!(content_type("predictor_app_client_bg.wasm"), "application/wasm");
	assert_eq!(content_type("LICENSE"), "application/octet-stream");
}
