use super::page::{discover, render};
use crate::Context;
use hyper::{Body, Request, Response};
use predictor_app_common::FormState;
use predictor_util::error::Result;

pub async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let mut state = FormState::new();
	state.apply_discovery(discover(context).await);
	render(context, state)
}
