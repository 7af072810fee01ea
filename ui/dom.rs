use html::Node;

/// Replace the contents of the element with `id` by the rendered `node`. Does nothing when the element is missing.
pub fn replace_contents(id: &str, node: Node) {
	let document = match web_sys::window().and_then(|window| window.document()) {
		Some(document) => document,
		None => return,
	};
	if let Some(element) = document.get_element_by_id(id) {
		element.set_inner_html(&node.render_to_string());
	}
}
