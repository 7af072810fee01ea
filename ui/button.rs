use html::{component, html};

/// A button that submits its form.
#[component]
pub fn Button(disabled: Option<bool>, id: Option<String>) {
	html! {
		<button class="button" disabled={disabled} id={id} type="submit">
			{children}
		</button>
	}
}

#[test]
fn test_disabled_button() {
	let html = html! {
		<Button disabled={Some(true)} id={None}>
			{"Predicting..."}
		</Button>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<button class="button" disabled type="submit">Predicting...</button>"#
	);
}
