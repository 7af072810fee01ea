use crate::number::format_number;
use serde_json::Value;
use thiserror::Error;

/// Why a submission failed. The message is shown to the user verbatim.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PredictError {
	/// The prediction endpoint answered with a non-success status.
	#[error("{0}")]
	Status(String),
	/// The request never produced a response.
	#[error("{0}")]
	Network(String),
	/// The response body could not be read or decoded.
	#[error("{0}")]
	Decode(String),
}

/// The model output extracted from a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum Prediction {
	Scalar(Value),
	List(Vec<Value>),
}

pub type PredictResult = Result<Option<Prediction>, PredictError>;

/// Interpret the status and body of a response from the prediction endpoint.
///
/// A non-success status fails with the body text, or `Status <code>` when the body is empty. A success body must be JSON; the result is its `prediction` field, or its `predictions` field when the first is missing or null. `Ok(None)` means neither field held a value.
pub fn read_prediction_response(status: u16, body: &str) -> PredictResult {
	if !(200..300).contains(&status) {
		let message = if body.is_empty() {
			format!("Status {}", status)
		} else {
			body.to_owned()
		};
		return Err(PredictError::Status(message));
	}
	let data: Value =
		serde_json::from_str(body).map_err(|error| PredictError::Decode(error.to_string()))?;
	if data.is_null() {
		return Err(PredictError::Decode(
			"the prediction response was null".to_owned(),
		));
	}
	let field = |name: &str| data.get(name).filter(|value| !value.is_null()).cloned();
	let prediction = field("prediction")
		.or_else(|| field("predictions"))
		.map(|value| match value {
			Value::Array(values) => Prediction::List(values),
			value => Prediction::Scalar(value),
		});
	Ok(prediction)
}

impl Prediction {
	/// The text shown after `Prediction:`. Lists are JSON encoded, strings are shown without quotes and numbers are formatted as a browser would.
	pub fn display(&self) -> String {
		match self {
			Prediction::List(values) => {
				let mut output = String::new();
				write_json(&mut output, &Value::Array(values.clone()));
				output
			}
			Prediction::Scalar(Value::String(value)) => value.clone(),
			Prediction::Scalar(value) => {
				let mut output = String::new();
				write_json(&mut output, value);
				output
			}
		}
	}
}

fn write_json(output: &mut String, value: &Value) {
	match value {
		Value::Null => output.push_str("null"),
		Value::Bool(value) => output.push_str(if *value { "true" } else { "false" }),
		Value::Number(number) => match number.as_f64() {
			Some(number) if number.is_finite() => output.push_str(&format_number(number)),
			_ => output.push_str(&number.to_string()),
		},
		Value::String(_) => output.push_str(&value.to_string()),
		Value::Array(values) => {
			output.push('[');
			for (index, value) in values.iter().enumerate() {
				if index > 0 {
					output.push(',');
				}
				write_json(output, value);
			}
			output.push(']');
		}
		Value::Object(entries) => {
			output.push('{');
			for (index, (key, value)) in entries.iter().enumerate() {
				if index > 0 {
					output.push(',');
				}
				output.push_str(&Value::String(key.clone()).to_string());
				output.push(':');
				write_json(output, value);
			}
			output.push('}');
		}
	}
}

#[test]
fn test_scalar_prediction() {
	let prediction = read_prediction_response(200, r#"{"prediction":7.5}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "7.5");
}

#[test]
fn test_list_prediction() {
	let prediction = read_prediction_response(200, r#"{"predictions":[1,2]}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "[1,2]");
	let prediction = read_prediction_response(200, r#"{"predictions":[1.0,2.25,"a"]}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), r#"[1,2.25,"a"]"#);
}

#[test]
fn test_prediction_field_precedence() {
	let prediction = read_prediction_response(200, r#"{"prediction":0,"predictions":[1]}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "0");
	let prediction = read_prediction_response(200, r#"{"prediction":null,"predictions":[1]}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "[1]");
	let prediction = read_prediction_response(200, r#"{"prediction":false}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "false");
	let prediction = read_prediction_response(200, r#"{"prediction":"setosa"}"#)
		.unwrap()
		.unwrap();
	assert_eq!(prediction.display(), "setosa");
	assert_eq!(read_prediction_response(200, r#"{"status":"ok"}"#), Ok(None));
}

#[test]
fn test_error_status() {
	assert_eq!(
		read_prediction_response(400, "bad input"),
		Err(PredictError::Status("bad input".to_owned()))
	);
	assert_eq!(
		read_prediction_response(503, "").unwrap_err().to_string(),
		"Status 503"
	);
}

#[test]
fn test_undecodable_body() {
	assert!(matches!(
		read_prediction_response(200, "<html>"),
		Err(PredictError::Decode(_))
	));
	assert!(matches!(
		read_prediction_response(200, "null"),
		Err(PredictError::Decode(_))
	));
}
