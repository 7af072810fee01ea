use crate::{
	number::to_number,
	request::PredictRequest,
	response::{PredictResult, Prediction},
	DEFAULT_FEATURE_COUNT, MAX_FEATURE_COUNT,
};
use serde::{Deserialize, Serialize};

/// Everything the predictor form shows, owned by whoever drives the form: the wasm client in the browser or a request handler on the server.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
	/// Canonical feature names, once discovery has produced them.
	pub feature_names: Option<Vec<String>>,
	pub feature_count: usize,
	/// Raw input text, one entry per feature slot.
	pub values: Vec<String>,
	pub result: Option<Prediction>,
	pub error: Option<String>,
	pub loading: bool,
}

/// The part of the state the server hands to the client through the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientProps {
	pub feature_names: Option<Vec<String>>,
	pub feature_count: usize,
	pub values: Vec<String>,
}

impl FormState {
	pub fn new() -> FormState {
		FormState {
			feature_names: None,
			feature_count: DEFAULT_FEATURE_COUNT,
			values: vec![String::new(); DEFAULT_FEATURE_COUNT],
			result: None,
			error: None,
			loading: false,
		}
	}

	/// Adopt the outcome of discovery. Known names fix the feature count to their number; otherwise the form falls back to the default count. Either way every slot starts empty.
	pub fn apply_discovery(&mut self, feature_names: Option<Vec<String>>) {
		let feature_count = feature_names
			.as_ref()
			.map(|feature_names| feature_names.len())
			.unwrap_or(DEFAULT_FEATURE_COUNT);
		self.feature_names = feature_names;
		self.feature_count = feature_count;
		self.values = vec![String::new(); feature_count];
	}

	/// Whether the feature count control accepts edits.
	pub fn feature_count_editable(&self) -> bool {
		self.feature_names.is_none()
	}

	/// Change the number of feature slots, keeping the values of retained slots. Refused when the names are known or `feature_count` is zero. Returns whether the count changed.
	pub fn set_feature_count(&mut self, feature_count: usize) -> bool {
		if !self.feature_count_editable() || feature_count == 0 {
			return false;
		}
		let feature_count = feature_count.min(MAX_FEATURE_COUNT);
		if feature_count == self.feature_count && self.values.len() == feature_count {
			return false;
		}
		self.feature_count = feature_count;
		self.values.resize(feature_count, String::new());
		true
	}

	/// Replace the value of one slot. Indexes past the last slot are ignored.
	pub fn set_value(&mut self, index: usize, value: String) {
		if let Some(slot) = self.values.get_mut(index) {
			*slot = value;
		}
	}

	/// The label of the field at `index`: its canonical name, or `f1`, `f2`, ... when the names are unknown.
	pub fn label(&self, index: usize) -> String {
		self.feature_names
			.as_ref()
			.and_then(|feature_names| feature_names.get(index).cloned())
			.unwrap_or_else(|| format!("f{}", index + 1))
	}

	/// Start a submission: clear the previous outcome, mark the form loading and build the request body. Returns `None` while a submission is already in flight.
	pub fn begin_submit(&mut self) -> Option<PredictRequest> {
		if self.loading {
			return None;
		}
		self.result = None;
		self.error = None;
		self.loading = true;
		Some(PredictRequest::new(
			self.feature_names.as_deref(),
			&self.values,
		))
	}

	/// Settle the submission in flight.
	pub fn finish_submit(&mut self, result: PredictResult) {
		match result {
			Ok(prediction) => {
				self.result = prediction;
				self.error = None;
			}
			Err(error) => {
				self.result = None;
				self.error = Some(error.to_string());
			}
		}
		self.loading = false;
	}

	pub fn client_props(&self) -> ClientProps {
		ClientProps {
			feature_names: self.feature_names.clone(),
			feature_count: self.feature_count,
			values: self.values.clone(),
		}
	}
}

impl From<ClientProps> for FormState {
	fn from(props: ClientProps) -> FormState {
		let mut state = FormState {
			feature_names: props.feature_names,
			feature_count: props.feature_count,
			values: props.values,
			..FormState::new()
		};
		state.values.resize(state.feature_count, String::new());
		state
	}
}

/// Read the text of the feature count control. Fractions are truncated; text that is not a number of at least one is rejected.
pub fn parse_feature_count(value: &str) -> Option<usize> {
	let feature_count = to_number(value);
	if !feature_count.is_finite() || feature_count < 1.0 {
		return None;
	}
	Some(feature_count.trunc().min(MAX_FEATURE_COUNT as f64) as usize)
}

#[cfg(test)]
use crate::response::PredictError;

#[test]
fn test_new_state() {
	let state = FormState::new();
	assert_eq!(state.feature_count, 4);
	assert_eq!(state.values, vec![""; 4]);
	assert!(state.feature_count_editable());
	assert!(!state.loading);
}

#[test]
fn test_apply_discovery() {
	let mut state = FormState::new();
	state.set_value(0, "1".to_owned());
	state.apply_discovery(Some(vec!["a".to_owned(), "b".to_owned()]));
	assert_eq!(state.feature_count, 2);
	assert_eq!(state.values, vec![""; 2]);
	assert!(!state.feature_count_editable());
	assert_eq!(state.label(1), "b");
	let mut state = FormState::new();
	state.set_feature_count(7);
	state.apply_discovery(None);
	assert_eq!(state.feature_count, 4);
	assert_eq!(state.values, vec![""; 4]);
	assert_eq!(state.label(2), "f3");
}

#[test]
fn test_set_feature_count_preserves_values() {
	let mut state = FormState::new();
	for (index, value) in ["1", "2", "3", "4"].iter().enumerate() {
		state.set_value(index, value.to_string());
	}
	for feature_count in 1..=12 {
		let before = state.values.clone();
		state.set_feature_count(feature_count);
		assert_eq!(state.values.len(), feature_count);
		assert_eq!(state.feature_count, feature_count);
		let retained = before.len().min(feature_count);
		assert_eq!(state.values[..retained], before[..retained]);
		assert!(state.values[retained..].iter().all(|value| value.is_empty()));
	}
	let mut state = FormState::new();
	for (index, value) in ["1", "2", "3", "4"].iter().enumerate() {
		state.set_value(index, value.to_string());
	}
	assert!(state.set_feature_count(2));
	assert_eq!(state.values, vec!["1", "2"]);
	assert!(state.set_feature_count(3));
	assert_eq!(state.values, vec!["1", "2", ""]);
}

#[test]
fn test_set_feature_count_refusals() {
	let mut state = FormState::new();
	assert!(!state.set_feature_count(0));
	assert!(!state.set_feature_count(4));
	assert!(state.set_feature_count(MAX_FEATURE_COUNT + 10));
	assert_eq!(state.values.len(), MAX_FEATURE_COUNT);
	state.apply_discovery(Some(vec!["a".to_owned()]));
	assert!(!state.set_feature_count(3));
	assert_eq!(state.feature_count, 1);
	assert_eq!(state.values.len(), 1);
}

#[test]
fn test_parse_feature_count() {
	assert_eq!(parse_feature_count("3"), Some(3));
	assert_eq!(parse_feature_count("2.9"), Some(2));
	assert_eq!(parse_feature_count("0"), None);
	assert_eq!(parse_feature_count(""), None);
	assert_eq!(parse_feature_count("-2"), None);
	assert_eq!(parse_feature_count("abc"), None);
	assert_eq!(parse_feature_count("Infinity"), None);
	assert_eq!(parse_feature_count("1e9"), Some(MAX_FEATURE_COUNT));
}

#[test]
fn test_set_value() {
	let mut state = FormState::new();
	state.set_value(2, "1.5".to_owned());
	state.set_value(9, "7".to_owned());
	assert_eq!(state.values, vec!["", "", "1.5", ""]);
}

#[test]
fn test_submit_lifecycle() {
	let mut state = FormState::new();
	state.error = Some("Status 500".to_owned());
	for (index, value) in ["3", "4", "5", "6"].iter().enumerate() {
		state.set_value(index, value.to_string());
	}
	let request = state.begin_submit().unwrap();
	assert_eq!(request.to_json().unwrap(), r#"{"features":[3,4,5,6]}"#);
	assert!(state.loading);
	assert_eq!(state.error, None);
	assert_eq!(state.begin_submit(), None);
	state.finish_submit(Ok(Some(Prediction::Scalar(serde_json::json!(7.5)))));
	assert!(!state.loading);
	assert_eq!(state.result.as_ref().unwrap().display(), "7.5");
	state.begin_submit().unwrap();
	assert_eq!(state.result, None);
	state.finish_submit(Err(PredictError::Status("bad input".to_owned())));
	assert!(!state.loading);
	assert_eq!(state.error.as_deref(), Some("bad input"));
	assert_eq!(state.result, None);
}

#[test]
fn test_client_props_round_trip() {
	let mut state = FormState::new();
	state.apply_discovery(Some(vec!["a".to_owned(), "b".to_owned()]));
	state.set_value(1, "2".to_owned());
	let props = serde_json::to_string(&state.client_props()).unwrap();
	let props: ClientProps = serde_json::from_str(&props).unwrap();
	assert_eq!(FormState::from(props), state);
}

#[test]
fn test_submit_network_failure() {
	let mut state = FormState::new();
	state.result = Some(Prediction::Scalar(serde_json::json!(1)));
	state.begin_submit().unwrap();
	assert_eq!(state.result, None);
	state.finish_submit(Err(PredictError::Network(
		"model service unavailable: connection refused".to_owned(),
	)));
	assert!(!state.loading);
	assert_eq!(state.result, None);
	assert_eq!(
		state.error.as_deref(),
		Some("model service unavailable: connection refused")
	);
	assert!(state.begin_submit().is_some());
}
