use crate::{
	layouts::document::{Document, PageInfo},
	Context,
};
use html::{component, html};
use hyper::{header, Body, Response, StatusCode};
use predictor_app_common::{components::PredictorForm, discovery::parse_discovery, FormState};
use predictor_util::error::Result;

#[component]
pub fn Page(page_info: PageInfo, state: FormState) {
	html! {
		<Document page_info={page_info}>
			<PredictorForm state={state} />
		</Document>
	}
}

pub fn render(context: &Context, state: FormState) -> Result<Response<Body>> {
	let page_info = PageInfo {
		client_wasm_js_src: context.client_js_src.clone(),
	};
	let html = html! { <Page page_info={page_info} state={state} /> }.render_to_string();
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(format!("<!doctype html>{}", html)))?;
	Ok(response)
}

/// Ask the model service for its feature names. An unreachable service leaves them unknown.
pub async fn discover(context: &Context) -> Option<Vec<String>> {
	let response = context.upstream.health().await.ok()?;
	parse_discovery(&response.text())
}
