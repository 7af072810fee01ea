use crate::{error::Error, Context};
use hyper::{Body, Request, Response};
use predictor_util::error::Result;

pub async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let body = hyper::body::to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	context.upstream.predict(body.to_vec()).await?.into_response()
}
