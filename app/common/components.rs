use crate::{response::Prediction, state::FormState};
use html::{component, html};
use predictor_ui as ui;

pub const ROOT_ID: &str = "predictor";
pub const FORM_ID: &str = "predictor-form";
pub const FEATURE_COUNT_ID: &str = "predictor-count";
pub const FEATURE_FIELDS_ID: &str = "predictor-fields";
pub const SUBMIT_ID: &str = "predictor-submit";
pub const OUTPUT_ID: &str = "predictor-output";

/// The whole form. Each dynamic region sits in a container with a stable id so the client can re-render it alone.
#[component]
pub fn PredictorForm(state: FormState) {
	let props = serde_json::to_string(&state.client_props()).ok();
	html! {
		<div class="predictor" data-props={props} id={ROOT_ID}>
			<ui::S1>
				<ui::H1>{"Model Predictor"}</ui::H1>
				<ui::P>{"Enter feature values and press Predict."}</ui::P>
				<div id={FEATURE_COUNT_ID}>
					<FeatureCountField
						editable={state.feature_count_editable()}
						feature_count={state.feature_count}
					/>
				</div>
				<ui::Form action={"/".to_owned()} id={Some(FORM_ID.to_owned())}>
					<div class="predictor-fields" id={FEATURE_FIELDS_ID}>
						<FeatureFields state={state.clone()} />
					</div>
					<div id={SUBMIT_ID}>
						<SubmitButton loading={state.loading} />
					</div>
				</ui::Form>
				<div id={OUTPUT_ID}>
					<PredictorOutput error={state.error.clone()} result={state.result.clone()} />
				</div>
			</ui::S1>
		</div>
	}
}

/// The count control lives outside the form element and joins it through the `form` attribute.
#[component]
pub fn FeatureCountField(editable: bool, feature_count: usize) {
	let note = if editable {
		None
	} else {
		Some(" (using server feature names)".to_owned())
	};
	html! {
		<ui::NumberField
			data_index={None}
			disabled={Some(!editable)}
			form={Some(FORM_ID.to_owned())}
			id={Some("feature-count".to_owned())}
			label={Some("Number of features:".to_owned())}
			min={Some("1".to_owned())}
			name={Some("feature_count".to_owned())}
			note={note}
			required={None}
			step={Some("1".to_owned())}
			value={Some(feature_count.to_string())}
		/>
	}
}

#[component]
pub fn FeatureFields(state: FormState) {
	let fields = (0..state.feature_count)
		.map(|index| {
			let value = state.values.get(index).cloned().unwrap_or_default();
			html! {
				<ui::NumberField
					data_index={Some(index.to_string())}
					disabled={None}
					form={None}
					id={Some(format!("feature-{}", index))}
					label={Some(state.label(index))}
					min={None}
					name={Some("value".to_owned())}
					note={None}
					required={Some(true)}
					step={None}
					value={Some(value)}
				/>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<div class="predictor-fields-grid">
			{fields}
		</div>
	}
}

#[component]
pub fn SubmitButton(loading: bool) {
	html! {
		<ui::Button
			disabled={Some(loading)}
			id={Some("predict-button".to_owned())}
		>
			{if loading { "Predicting..." } else { "Predict" }}
		</ui::Button>
	}
}

#[component]
pub fn PredictorOutput(error: Option<String>, result: Option<Prediction>) {
	html! {
		<>
			{error.map(|error| html! {
				<ui::Alert id={None} level={ui::Level::Danger} title={None}>
					{format!("Error: {}", error)}
				</ui::Alert>
			})}
			{result.map(|result| html! {
				<ui::Alert id={None} level={ui::Level::Success} title={None}>
					<strong>{"Prediction:"}</strong>
					{format!(" {}", result.display())}
				</ui::Alert>
			})}
		</>
	}
}

#[test]
fn test_render_default_form() {
	let html = html! { <PredictorForm state={FormState::new()} /> }.render_to_string();
	assert!(html.contains("<h1 class=\"h1\">Model Predictor</h1>"));
	assert!(html.contains("Enter feature values and press Predict."));
	for label in &["f1", "f2", "f3", "f4"] {
		assert!(html.contains(&format!(">{}<input", label)));
	}
	assert!(!html.contains("f5"));
	assert!(!html.contains("using server feature names"));
	assert!(html.contains(r#"name="feature_count" step="1" type="number" value="4""#));
	assert!(html.contains(r#"<button class="button" id="predict-button" type="submit">Predict</button>"#));
	assert!(html.contains("data-props=\"{&quot;feature_names&quot;:null,"));
}

#[test]
fn test_render_named_form() {
	let mut state = FormState::new();
	state.apply_discovery(Some(vec!["sepal".to_owned(), "petal".to_owned()]));
	let html = html! { <FeatureCountField editable={state.feature_count_editable()} feature_count={state.feature_count} /> }
		.render_to_string();
	assert!(html.contains(" disabled "));
	assert!(html.contains(r#"value="2""#));
	assert!(html.contains("<span class=\"field-note\"> (using server feature names)</span>"));
	let html = html! { <FeatureFields state={state} /> }.render_to_string();
	assert!(html.contains(
		r#"<label class="field-label" for="feature-0">sepal<input class="form-number-field" data-index="0" id="feature-0" name="value" required step="any" type="number" value="" /></label>"#
	));
	assert!(html.contains(">petal<input"));
}

#[test]
fn test_render_loading_button() {
	let html = html! { <SubmitButton loading={true} /> }.render_to_string();
	assert_eq!(
		html,
		r#"<button class="button" disabled id="predict-button" type="submit">Predicting...</button>"#
	);
}

#[test]
fn test_render_output() {
	let html = html! {
		<PredictorOutput error={Some("bad input".to_owned())} result={None} />
	}
	.render_to_string();
	assert!(html.contains(">Error: bad input</div>"));
	assert!(!html.contains("Prediction:"));
	let html = html! {
		<PredictorOutput
			error={None}
			result={Some(Prediction::List(vec![serde_json::json!(1), serde_json::json!(2)]))}
		/>
	}
	.render_to_string();
	assert!(html.contains("<strong>Prediction:</strong> [1,2]</div>"));
	assert!(!html.contains("Error:"));
	let html = html! { <PredictorOutput error={None} result={None} /> }.render_to_string();
	assert_eq!(html, "");
}
