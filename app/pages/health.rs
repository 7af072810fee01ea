use crate::Context;
use hyper::{Body, Request, Response, StatusCode};
use predictor_util::error::Result;

/// Liveness of this server alone. The model service is not consulted.
pub async fn get(_context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let response = Response::builder()
		.status(StatusCode::OK)
		.body(Body::empty())?;
	Ok(response)
}
