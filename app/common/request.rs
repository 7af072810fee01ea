use crate::number::{to_number, JsonNumber};
use serde::{Serialize, Serializer};

/// The body posted to the prediction endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictRequest {
	pub features: Features,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Features {
	/// Values keyed by canonical feature name, in feature order.
	Named(NamedFeatures),
	/// Values in slot order.
	Positional(Vec<JsonNumber>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedFeatures(Vec<(String, JsonNumber)>);

impl NamedFeatures {
	/// Set the value for `name`. A repeated name keeps its first position and takes the latest value.
	pub fn insert(&mut self, name: String, value: JsonNumber) {
		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, existing)) => *existing = value,
			None => self.0.push((name, value)),
		}
	}
}

impl Serialize for NamedFeatures {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
	}
}

impl PredictRequest {
	/// Convert every raw value to a number and key them by `feature_names` when those are known. A name without a value at its position gets NaN.
	pub fn new(feature_names: Option<&[String]>, values: &[String]) -> PredictRequest {
		let numbers = values
			.iter()
			.map(|value| JsonNumber(to_number(value)))
			.collect::<Vec<_>>();
		let features = match feature_names {
			Some(feature_names) => {
				let mut named = NamedFeatures::default();
				for (index, name) in feature_names.iter().enumerate() {
					let value = numbers
						.get(index)
						.copied()
						.unwrap_or(JsonNumber(f64::NAN));
					named.insert(name.clone(), value);
				}
				Features::Named(named)
			}
			None => Features::Positional(numbers),
		};
		PredictRequest { features }
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

#[test]
fn test_named_request() {
	let feature_names = vec!["a".to_owned(), "b".to_owned()];
	let values = vec!["1".to_owned(), "2".to_owned()];
	let request = PredictRequest::new(Some(&feature_names), &values);
	insta::assert_snapshot!(request.to_json().unwrap(), @r###"{"features":{"a":1,"b":2}}"###);
}

#[test]
fn test_positional_request() {
	let values = vec!["3", "4", "5", "6"]
		.into_iter()
		.map(String::from)
		.collect::<Vec<_>>();
	let request = PredictRequest::new(None, &values);
	insta::assert_snapshot!(request.to_json().unwrap(), @"{\"features\":[3,4,5,6]}");
}

#[test]
fn test_request_keeps_feature_order() {
	let feature_names = vec!["zeta".to_owned(), "alpha".to_owned(), "mid".to_owned()];
	let values = vec!["0.5".to_owned(), "x".to_owned(), "".to_owned()];
	let request = PredictRequest::new(Some(&feature_names), &values);
	assert_eq!(
		request.to_json().unwrap(),
		r#"{"features":{"zeta":0.5,"alpha":null,"mid":0}}"#
	);
}

#[test]
fn test_request_repeated_feature_name() {
	let feature_names = vec!["a".to_owned(), "b".to_owned(), "a".to_owned()];
	let values = vec!["1".to_owned(), "2".to_owned(), "3".to_owned()];
	let request = PredictRequest::new(Some(&feature_names), &values);
	assert_eq!(
		request.to_json().unwrap(),
		r#"{"features":{"a":3,"b":2}}"#
	);
}
