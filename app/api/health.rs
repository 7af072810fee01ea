use crate::Context;
use hyper::{Body, Request, Response};
use predictor_util::error::Result;

/// Answer with whatever the model service reports about itself, including its feature names.
pub async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	context.upstream.health().await?.into_response()
}
