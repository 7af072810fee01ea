use html::{component, html};

/// A numeric input. `step` defaults to `any` so decimal values pass the browser's validation.
#[component]
pub fn NumberField(
	data_index: Option<String>,
	disabled: Option<bool>,
	form: Option<String>,
	id: Option<String>,
	label: Option<String>,
	min: Option<String>,
	name: Option<String>,
	note: Option<String>,
	required: Option<bool>,
	step: Option<String>,
	value: Option<String>,
) {
	html! {
		<label class="field-label" html_for={id.clone()}>
			{label}
			<input
				class="form-number-field"
				data-index={data_index}
				disabled={disabled}
				form={form}
				id={id}
				min={min}
				name={name}
				required={required}
				step={step.unwrap_or_else(|| "any".to_owned())}
				type="number"
				value={value}
			/>
			{note.map(|note| html! { <span class="field-note">{note}</span> })}
		</label>
	}
}

#[test]
fn test_number_field() {
	let html = html! {
		<NumberField
			data_index={Some("0".to_owned())}
			disabled={None}
			form={None}
			id={Some("feature-0".to_owned())}
			label={Some("f1".to_owned())}
			min={None}
			name={Some("value".to_owned())}
			note={None}
			required={Some(true)}
			step={None}
			value={Some("1.5".to_owned())}
		/>
	}
	.render_to_string();
	assert_eq!(
		html,
		concat!(
			r#"<label class="field-label" for="feature-0">f1"#,
			r#"<input class="form-number-field" data-index="0" id="feature-0" name="value" required step="any" type="number" value="1.5" />"#,
			r#"</label>"#,
		)
	);
}
