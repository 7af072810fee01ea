pub mod components;
pub mod discovery;
pub mod number;
pub mod request;
pub mod response;
pub mod state;

pub use self::state::{ClientProps, FormState};

/// The feature count used until the discovery endpoint names the features.
pub const DEFAULT_FEATURE_COUNT: usize = 4;

/// Feature counts entered by hand are clamped to this many slots.
pub const MAX_FEATURE_COUNT: usize = 1024;

/// The path the browser queries for canonical feature names.
pub const HEALTH_PATH: &str = "/api/health";

/// The path the browser posts feature values to.
pub const PREDICT_PATH: &str = "/predict";
