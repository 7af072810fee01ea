use html::{component, html};

/// A form that posts its fields url-encoded to `action`, so it still works when the page runs without scripts.
#[component]
pub fn Form(action: String, id: Option<String>) {
	html! {
		<form action={action} autocomplete="off" class="form" id={id} method="post">
			{children}
		</form>
	}
}

#[test]
fn test_form() {
	let html = html! {
		<Form action={"/".to_owned()} id={Some("predictor-form".to_owned())}>
			<input name="value" />
		</Form>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<form action="/" autocomplete="off" class="form" id="predictor-form" method="post"><input name="value" /></form>"#
	);
}
