use html::{component, html, raw};

#[derive(Clone)]
pub struct PageInfo {
	pub client_wasm_js_src: Option<String>,
}

#[component]
pub fn Document(page_info: PageInfo) {
	html! {
		<html lang="en">
			<head>
				<meta charset="utf-8" />
				<meta content="width=device-width, initial-scale=1" name="viewport" />
				<title>{"Model Predictor"}</title>
				<link href="/styles.css" rel="stylesheet" />
				<meta content="Enter feature values and get a prediction from the model." name="description" />
			</head>
			<body>
				{children}
				{page_info.client_wasm_js_src.map(|client_wasm_js_src| html! {
					<script type="module">
						{raw!(format!(r#"import init from "{}"; init()"#, client_wasm_js_src))}
					</script>
				})}
			</body>
		</html>
	}
}
