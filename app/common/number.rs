//! Conversion of raw input text to numbers the way a browser's `Number()` does it, and the JSON and display formatting that goes with it.

use serde::{Serialize, Serializer};

/// Convert the raw text of an input to a number.
///
/// Surrounding whitespace is ignored and empty text is zero. Decimal literals with an optional sign, fraction and exponent are accepted, as are `0x`, `0o` and `0b` prefixed integers and `Infinity`. Anything else is NaN.
pub fn to_number(value: &str) -> f64 {
	let value = value.trim();
	if value.is_empty() {
		return 0.0;
	}
	let radix = match value.get(..2) {
		Some("0x") | Some("0X") => Some(16),
		Some("0o") | Some("0O") => Some(8),
		Some("0b") | Some("0B") => Some(2),
		_ => None,
	};
	if let Some(radix) = radix {
		let digits = &value[2..];
		if digits.is_empty() {
			return f64::NAN;
		}
		return digits
			.chars()
			.try_fold(0.0, |number: f64, c| {
				c.to_digit(radix)
					.map(|digit| number * f64::from(radix) + f64::from(digit))
			})
			.unwrap_or(f64::NAN);
	}
	let (sign, unsigned) = if let Some(unsigned) = value.strip_prefix('-') {
		(-1.0, unsigned)
	} else if let Some(unsigned) = value.strip_prefix('+') {
		(1.0, unsigned)
	} else {
		(1.0, value)
	};
	if unsigned == "Infinity" {
		return sign * f64::INFINITY;
	}
	// Rust's float parser also accepts spellings such as `inf` and `nan`, so only hand it decimal literals.
	let is_decimal_literal = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
		&& unsigned
			.chars()
			.all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
	if !is_decimal_literal {
		return f64::NAN;
	}
	unsigned
		.parse::<f64>()
		.map(|number| sign * number)
		.unwrap_or(f64::NAN)
}

/// A number as it appears in JSON sent by a browser. Integral values are written without a fractional part and non-finite values are written as `null`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JsonNumber(pub f64);

/// Integers up to this magnitude are exactly representable and written as integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for JsonNumber {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let value = self.0;
		if !value.is_finite() {
			serializer.serialize_none()
		} else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
			serializer.serialize_i64(value as i64)
		} else {
			serializer.serialize_f64(value)
		}
	}
}

/// Format a number the way a browser prints it: integral values have no fractional part and large exponents carry an explicit sign.
pub fn format_number(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_owned()
	} else if value.is_infinite() {
		if value > 0.0 {
			"Infinity".to_owned()
		} else {
			"-Infinity".to_owned()
		}
	} else if value.fract() == 0.0 && value.abs() < 1e21 {
		format!("{:.0}", value + 0.0)
	} else {
		let formatted = serde_json::Number::from_f64(value)
			.map(|number| number.to_string())
			.unwrap_or_else(|| value.to_string());
		match formatted.find('e') {
			Some(index) if !formatted[index + 1..].starts_with('-') => {
				format!("{}e+{}", &formatted[..index], &formatted[index + 1..])
			}
			_ => formatted,
		}
	}
}

#[test]
fn test_to_number() {
	assert_eq!(to_number("3"), 3.0);
	assert_eq!(to_number(" 2.5 "), 2.5);
	assert_eq!(to_number("-1e3"), -1000.0);
	assert_eq!(to_number(".5"), 0.5);
	assert_eq!(to_number("5."), 5.0);
	assert_eq!(to_number("+7"), 7.0);
	assert_eq!(to_number(""), 0.0);
	assert_eq!(to_number("   "), 0.0);
	assert_eq!(to_number("0x1f"), 31.0);
	assert_eq!(to_number("0b101"), 5.0);
	assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
	assert!(to_number("abc").is_nan());
	assert!(to_number("1e").is_nan());
	assert!(to_number("inf").is_nan());
	assert!(to_number("nan").is_nan());
	assert!(to_number("-0x10").is_nan());
	assert!(to_number("1,5").is_nan());
}

#[test]
fn test_json_number() {
	let numbers = vec![
		JsonNumber(1.0),
		JsonNumber(-0.0),
		JsonNumber(2.5),
		JsonNumber(f64::NAN),
		JsonNumber(f64::INFINITY),
	];
	assert_eq!(
		serde_json::to_string(&numbers).unwrap(),
		"[1,0,2.5,null,null]"
	);
}

#[test]
fn test_format_number() {
	assert_eq!(format_number(7.5), "7.5");
	assert_eq!(format_number(3.0), "3");
	assert_eq!(format_number(-0.0), "0");
	assert_eq!(format_number(0.1), "0.1");
	assert_eq!(format_number(1e21), "1e+21");
	assert_eq!(format_number(1.5e-7), "1.5e-7");
	assert_eq!(format_number(f64::NAN), "NaN");
}
