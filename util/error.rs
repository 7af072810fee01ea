pub use anyhow::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Build an [`Error`] from a format string.
#[macro_export]
macro_rules! err {
	($($t:tt)*) => {
		$crate::error::Error::msg(format!($($t)*))
	};
}

#[test]
fn test_err() {
	let error = err!("unable to reach {}", "http://localhost:5000");
	assert_eq!(error.to_string(), "unable to reach http://localhost:5000");
}
