use crate::{handle, Context, Options};
use hyper::{header, Body, Method, Request, Response, StatusCode};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

/// A model service that names two features and predicts the sum of the values it is sent.
async fn model_service(_context: Arc<()>, request: Request<Body>) -> Response<Body> {
	match (request.method(), request.uri().path()) {
		(&Method::GET, "/") => Response::builder()
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(
				r#"{"status":"ok","model_loaded":true,"features":["sepal","petal"]}"#,
			))
			.unwrap(),
		(&Method::POST, "/predict") => {
			let data = hyper::body::to_bytes(request.into_body()).await.unwrap();
			let data: serde_json::Value = serde_json::from_slice(&data).unwrap();
			let values: Vec<serde_json::Value> = match &data["features"] {
				serde_json::Value::Object(features) => features.values().cloned().collect(),
				serde_json::Value::Array(features) => features.clone(),
				_ => Vec::new(),
			};
			let sum: Option<f64> = values.iter().map(|value| value.as_f64()).sum();
			match sum {
				Some(sum) => Response::builder()
					.header(header::CONTENT_TYPE, "application/json")
					.body(Body::from(serde_json::json!({ "prediction": sum }).to_string()))
					.unwrap(),
				None => Response::builder()
					.status(StatusCode::BAD_REQUEST)
					.header(header::CONTENT_TYPE, "text/plain")
					.body(Body::from("feature values must be numbers"))
					.unwrap(),
			}
		}
		_ => Response::builder()
			.status(StatusCode::NOT_FOUND)
			.body(Body::empty())
			.unwrap(),
	}
}

fn spawn_model_service() -> SocketAddr {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(predictor_util::serve::serve_listener(
		listener,
		(),
		model_service,
	));
	addr
}

/// An address nothing listens on.
fn closed_addr() -> SocketAddr {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	listener.local_addr().unwrap()
}

/// A model service that accepts connections and never answers. Keep the listener alive for as long as it should stay silent.
fn silent_model_service() -> (std::net::TcpListener, SocketAddr) {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	(listener, addr)
}

fn context(upstream_addr: SocketAddr) -> Arc<Context> {
	let options = Options {
		client_dir: PathBuf::from("missing_client_dir"),
		host: "127.0.0.1".parse().unwrap(),
		port: 0,
		upstream_url: format!("http://{}", upstream_addr).parse().unwrap(),
		upstream_health_path: "/".to_owned(),
		upstream_predict_path: "/predict".to_owned(),
	};
	Arc::new(Context::new(options).unwrap())
}

async fn request(
	context: &Arc<Context>,
	method: Method,
	path: &str,
	body: &str,
) -> (StatusCode, String) {
	let request = Request::builder()
		.method(method)
		.uri(path)
		.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
		.body(Body::from(body.to_owned()))
		.unwrap();
	let response = handle(context.clone(), request).await;
	let status = response.status();
	let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
	(status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_api_health_forwards_to_model_service() {
	let context = context(spawn_model_service());
	let (status, body) = request(&context, Method::GET, "/api/health", "").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains(r#""features":["sepal","petal"]"#));
}

#[tokio::test]
async fn test_predict_forwards_to_model_service() {
	let context = context(spawn_model_service());
	let request = Request::builder()
		.method(Method::POST)
		.uri("/predict")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"features":{"sepal":3,"petal":4.5}}"#))
		.unwrap();
	let response = handle(context.clone(), request).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get(header::CONTENT_TYPE).unwrap(),
		"application/json"
	);
	let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
	assert_eq!(&body[..], br#"{"prediction":7.5}"#);
	let (status, body) = request_json(&context, r#"{"features":{"sepal":null,"petal":1}}"#).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, "feature values must be numbers");
}

async fn request_json(context: &Arc<Context>, body: &str) -> (StatusCode, String) {
	request(context, Method::POST, "/predict", body).await
}

#[tokio::test]
async fn test_model_service_unavailable() {
	let context = context(closed_addr());
	let (status, body) = request(&context, Method::GET, "/api/health", "").await;
	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert!(body.starts_with("model service unavailable"));
	let (status, _) = request_json(&context, r#"{"features":[1,2]}"#).await;
	assert_eq!(status, StatusCode::BAD_GATEWAY);
	let (status, body) = request(&context, Method::GET, "/", "").await;
	assert_eq!(status, StatusCode::OK);
	for label in &["f1", "f2", "f3", "f4"] {
		assert!(body.contains(&format!(">{}<input", label)));
	}
	assert!(!body.contains("using server feature names"));
	let (status, _) = request(&context, Method::GET, "/health", "").await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_index_renders_discovered_names() {
	let context = context(spawn_model_service());
	let (status, body) = request(&context, Method::GET, "/", "").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.starts_with("<!doctype html>"));
	assert!(body.contains(">sepal<input"));
	assert!(body.contains(">petal<input"));
	assert!(body.contains("using server feature names"));
	assert!(!body.contains("<script type=\"module\">"));
}

#[tokio::test]
async fn test_index_post_predicts() {
	let context = context(spawn_model_service());
	let (status, body) = request(&context, Method::POST, "/", "value=3&value=4.5").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("<strong>Prediction:</strong> 7.5"));
	assert!(body.contains(r#"value="4.5""#));
	let (_, body) = request(&context, Method::POST, "/", "value=abc&value=1").await;
	assert!(body.contains("Error: feature values must be numbers"));
	assert!(!body.contains("Prediction:"));
}

#[tokio::test]
async fn test_index_post_resizes() {
	let context = context(closed_addr());
	let (status, body) = request(
		&context,
		Method::POST,
		"/",
		"feature_count=2&value=1&value=2&value=3&value=4",
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains(">f2<input"));
	assert!(!body.contains(">f3<input"));
	assert!(body.contains(r#"name="feature_count" step="1" type="number" value="2""#));
	assert!(!body.contains("Prediction:"));
	assert!(!body.contains("Error:"));
}

#[tokio::test]
async fn test_assets_and_unknown_routes() {
	let context = context(closed_addr());
	let (status, body) = request(&context, Method::GET, "/styles.css", "").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains(".predictor-fields-grid"));
	let (status, _) = request(&context, Method::GET, "/js/predictor_app_client.js", "").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	let (status, body) = request(&context, Method::GET, "/models", "").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, "not found");
	let (status, _) = request(&context, Method::DELETE, "/predict", "").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_renders_while_model_service_is_silent() {
	let (_listener, addr) = silent_model_service();
	let context = context(addr);
	let (status, body) = tokio::time::timeout(
		std::time::Duration::from_secs(5),
		request(&context, Method::GET, "/", ""),
	)
	.await
	.unwrap();
	assert_eq!(status, StatusCode::OK);
	for label in &["f1", "f2", "f3", "f4"] {
		assert!(body.contains(&format!(">{}<input", label)));
	}
	let (status, _) = tokio::time::timeout(
		std::time::Duration::from_secs(5),
		request(&context, Method::GET, "/api/health", ""),
	)
	.await
	.unwrap();
	assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_index_post_shows_network_error() {
	let context = context(closed_addr());
	let (status, body) = request(
		&context,
		Method::POST,
		"/",
		"feature_count=4&value=1&value=2&value=3&value=4",
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("Error: model service unavailable"));
	assert!(!body.contains("Prediction:"));
	assert!(body.contains(r#"value="3""#));
	assert!(body.contains(">Predict</button>"));
}
