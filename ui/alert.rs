use html::{component, html};

#[derive(Clone)]
pub enum Level {
	Success,
	Danger,
}

#[component]
pub fn Alert(id: Option<String>, level: Level, title: Option<String>) {
	let level_class = match level {
		Level::Success => "alert-level-success",
		Level::Danger => "alert-level-danger",
	};
	html! {
		<div class={format!("alert-wrapper {}", level_class)} id={id} role="status">
			{
				title.map(|title| {
					html! {
						<div class="alert-title">
							{title}
						</div>
					}
				})
			}
			{children}
		</div>
	}
}

#[test]
fn test_alert() {
	let html = html! {
		<Alert id={None} level={Level::Danger} title={None}>
			{"Error: bad input"}
		</Alert>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<div class="alert-wrapper alert-level-danger" role="status">Error: bad input</div>"#
	);
}
