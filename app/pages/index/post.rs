use super::page::{discover, render};
use crate::{error::Error, Context};
use hyper::{Body, Request, Response};
use predictor_app_common::{
	request::PredictRequest,
	response::{read_prediction_response, PredictError, PredictResult},
	state::parse_feature_count,
	FormState,
};
use predictor_util::error::Result;

/// The form post made by browsers without the client: a `feature_count` field, present only while the count is editable, and one `value` field per slot.
pub async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = hyper::body::to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	let fields: Vec<(String, String)> =
		serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	let mut feature_count = None;
	let mut values = Vec::new();
	for (name, value) in fields {
		match name.as_str() {
			"feature_count" => feature_count = parse_feature_count(&value),
			"value" => values.push(value),
			_ => {}
		}
	}
	let mut state = FormState::new();
	state.apply_discovery(discover(context).await);
	if let Some(feature_count) = feature_count {
		state.set_feature_count(feature_count);
	}
	for (index, value) in values.iter().enumerate() {
		state.set_value(index, value.clone());
	}
	// A changed count only resizes the form. The values are submitted on the next post.
	if values.len() == state.feature_count {
		if let Some(request) = state.begin_submit() {
			let result = predict(context, &request).await;
			state.finish_submit(result);
		}
	}
	render(context, state)
}

async fn predict(context: &Context, request: &PredictRequest) -> PredictResult {
	let body = request
		.to_json()
		.map_err(|error| PredictError::Decode(error.to_string()))?;
	let response = context
		.upstream
		.predict(body.into_bytes())
		.await
		.map_err(|error| PredictError::Network(error.to_string()))?;
	read_prediction_response(response.status.as_u16(), &response.text())
}
