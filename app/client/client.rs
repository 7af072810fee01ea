use html::html;
use predictor_app_common::{
	components::{
		FeatureCountField, FeatureFields, PredictorOutput, SubmitButton, FEATURE_COUNT_ID,
		FEATURE_FIELDS_ID, FORM_ID, OUTPUT_ID, ROOT_ID, SUBMIT_ID,
	},
	discovery::parse_discovery,
	request::PredictRequest,
	response::{read_prediction_response, PredictError, PredictResult},
	state::parse_feature_count,
	ClientProps, FormState, HEALTH_PATH, PREDICT_PATH,
};
use predictor_ui as ui;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::console;

type State = Rc<RefCell<FormState>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	console_error_panic_hook::set_once();
	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let root = document
		.get_element_by_id(ROOT_ID)
		.ok_or_else(|| JsValue::from_str("missing predictor root"))?
		.dyn_into::<web_sys::HtmlElement>()?;
	let client_props = root
		.dataset()
		.get("props")
		.ok_or_else(|| JsValue::from_str("missing predictor props"))?;
	let client_props: ClientProps = serde_json::from_str(&client_props)
		.map_err(|error| JsValue::from_str(&error.to_string()))?;
	let state: State = Rc::new(RefCell::new(FormState::from(client_props)));
	listen(&document, FEATURE_COUNT_ID, "input", {
		let state = state.clone();
		move |event| on_feature_count_input(&state, event)
	})?;
	listen(&document, FEATURE_COUNT_ID, "keydown", on_feature_count_keydown)?;
	listen(&document, FEATURE_FIELDS_ID, "input", {
		let state = state.clone();
		move |event| on_field_input(&state, event)
	})?;
	listen(&document, FORM_ID, "submit", {
		let state = state.clone();
		move |event| on_submit(&state, event)
	})?;
	spawn_local(discover(state));
	Ok(())
}

/// Listeners sit on containers, so they survive re-rendering the container's contents.
fn listen<F>(
	document: &web_sys::Document,
	id: &str,
	event_type: &str,
	callback: F,
) -> Result<(), JsValue>
where
	F: Fn(web_sys::Event) + 'static,
{
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?;
	let callback = Closure::wrap(Box::new(callback) as Box<dyn Fn(web_sys::Event)>);
	element.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
	callback.forget();
	Ok(())
}

fn event_input(event: &web_sys::Event) -> Option<web_sys::HtmlInputElement> {
	event
		.target()
		.and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
}

fn on_feature_count_input(state: &State, event: web_sys::Event) {
	let input = match event_input(&event) {
		Some(input) => input,
		None => return,
	};
	let feature_count = match parse_feature_count(&input.value()) {
		Some(feature_count) => feature_count,
		None => return,
	};
	let changed = state.borrow_mut().set_feature_count(feature_count);
	if changed {
		render_feature_fields(&state.borrow());
	}
}

/// The count control belongs to the form so the page works without scripts, but with the client running Enter there only changes the count.
fn on_feature_count_keydown(event: web_sys::Event) {
	let key = match event.dyn_ref::<web_sys::KeyboardEvent>() {
		Some(event) => event.key(),
		None => return,
	};
	if submits_form(&key) {
		event.prevent_default();
	}
}

fn submits_form(key: &str) -> bool {
	key == "Enter"
}

fn on_field_input(state: &State, event: web_sys::Event) {
	let input = match event_input(&event) {
		Some(input) => input,
		None => return,
	};
	let index = match input
		.get_attribute("data-index")
		.and_then(|index| index.parse::<usize>().ok())
	{
		Some(index) => index,
		None => return,
	};
	state.borrow_mut().set_value(index, input.value());
}

fn on_submit(state: &State, event: web_sys::Event) {
	event.prevent_default();
	let request = match state.borrow_mut().begin_submit() {
		Some(request) => request,
		None => return,
	};
	render_submission(&state.borrow());
	let state = state.clone();
	spawn_local(async move {
		let result = predict(&request).await;
		state.borrow_mut().finish_submit(result);
		render_submission(&state.borrow());
	});
}

async fn discover(state: State) {
	let feature_names = match get_health().await {
		Ok(body) => parse_discovery(&body),
		Err(error) => {
			console::debug_1(&format!("feature discovery failed: {}", error).into());
			None
		}
	};
	state.borrow_mut().apply_discovery(feature_names);
	let state = state.borrow();
	render_feature_count(&state);
	render_feature_fields(&state);
}

async fn get_health() -> Result<String, PredictError> {
	let request = web_sys::Request::new_with_str(HEALTH_PATH).map_err(network_error)?;
	let (_, body) = fetch(&request).await?;
	Ok(body)
}

async fn predict(request: &PredictRequest) -> PredictResult {
	let body = request
		.to_json()
		.map_err(|error| PredictError::Decode(error.to_string()))?;
	let headers = web_sys::Headers::new().map_err(network_error)?;
	headers
		.set("Content-Type", "application/json")
		.map_err(network_error)?;
	let init = web_sys::RequestInit::new();
	init.set_method("POST");
	init.set_headers(&headers);
	init.set_body(&JsValue::from_str(&body));
	let request =
		web_sys::Request::new_with_str_and_init(PREDICT_PATH, &init).map_err(network_error)?;
	let (status, body) = fetch(&request).await?;
	read_prediction_response(status, &body)
}

/// Send `request` and read the whole body as text, whatever the status.
async fn fetch(request: &web_sys::Request) -> Result<(u16, String), PredictError> {
	let window =
		web_sys::window().ok_or_else(|| PredictError::Network("no window".to_owned()))?;
	let response = JsFuture::from(window.fetch_with_request(request))
		.await
		.map_err(network_error)?;
	let response: web_sys::Response = response.dyn_into().map_err(network_error)?;
	let text = response.text().map_err(decode_error)?;
	let text = JsFuture::from(text).await.map_err(decode_error)?;
	Ok((response.status(), text.as_string().unwrap_or_default()))
}

fn js_message(value: &JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|error| String::from(error.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| "request failed".to_owned())
}

fn network_error(value: JsValue) -> PredictError {
	PredictError::Network(js_message(&value))
}

fn decode_error(value: JsValue) -> PredictError {
	PredictError::Decode(js_message(&value))
}

fn render_feature_count(state: &FormState) {
	ui::replace_contents(
		FEATURE_COUNT_ID,
		html! {
			<FeatureCountField
				editable={state.feature_count_editable()}
				feature_count={state.feature_count}
			/>
		},
	);
}

fn render_feature_fields(state: &FormState) {
	ui::replace_contents(
		FEATURE_FIELDS_ID,
		html! { <FeatureFields state={state.clone()} /> },
	);
}

fn render_submission(state: &FormState) {
	ui::replace_contents(SUBMIT_ID, html! { <SubmitButton loading={state.loading} /> });
	ui::replace_contents(
		OUTPUT_ID,
		html! { <PredictorOutput error={state.error.clone()} result={state.result.clone()} /> },
	);
}

#[test]
fn test_only_enter_submits_from_the_count_field() {
	assert!(submits_form("Enter"));
	assert!(!submits_form("ArrowUp"));
	assert!(!submits_form("5"));
	assert!(!submits_form("Backspace"));
}
