use serde_json::Value;

/// Read the canonical feature names from the body of the discovery endpoint.
///
/// Only a JSON object whose `features` field is a non-empty array of strings counts. Any other body, including one that is not JSON, yields `None`.
pub fn parse_discovery(body: &str) -> Option<Vec<String>> {
	let response: Value = serde_json::from_str(body).ok()?;
	let features = match response.as_object()?.get("features")? {
		Value::Array(features) => features,
		_ => return None,
	};
	if features.is_empty() {
		return None;
	}
	features
		.iter()
		.map(|feature| feature.as_str().map(ToOwned::to_owned))
		.collect()
}

#[test]
fn test_parse_discovery() {
	assert_eq!(
		parse_discovery(r#"{"status":"ok","model_loaded":true,"features":["f1","f2"]}"#),
		Some(vec!["f1".to_owned(), "f2".to_owned()])
	);
	assert_eq!(parse_discovery(r#"{"status":"ok","features":null}"#), None);
	assert_eq!(parse_discovery(r#"{"status":"ok"}"#), None);
	assert_eq!(parse_discovery(r#"{"features":[]}"#), None);
	assert_eq!(parse_discovery(r#"{"features":"f1"}"#), None);
	assert_eq!(parse_discovery(r#"{"features":["f1",2]}"#), None);
	assert_eq!(parse_discovery("[1,2]"), None);
	assert_eq!(parse_discovery(r#"[["a","b"]]"#), None);
	assert_eq!(parse_discovery(r#"[{"features":["a"]}]"#), None);
	assert_eq!(parse_discovery("upstream unavailable"), None);
}
