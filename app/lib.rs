use self::{error::Error, upstream::Upstream};
use hyper::{Body, Method, Request, Response, StatusCode};
use predictor_util::error::Result;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use url::Url;

mod api;
mod assets;
pub mod error;
mod layouts;
mod pages;
mod upstream;

#[cfg(test)]
mod test;

/// The file name wasm-bindgen gives the client crate's javascript glue.
const CLIENT_JS_FILE: &str = "predictor_app_client.js";

pub struct Options {
	pub client_dir: PathBuf,
	pub host: std::net::IpAddr,
	pub port: u16,
	pub upstream_url: Url,
	pub upstream_health_path: String,
	pub upstream_predict_path: String,
}

pub struct Context {
	pub options: Options,
	pub upstream: Upstream,
	/// Where the page loads the client from, when the client has been built.
	pub client_js_src: Option<String>,
}

impl Context {
	pub fn new(options: Options) -> Result<Context> {
		let upstream = Upstream::new(
			&options.upstream_url,
			&options.upstream_health_path,
			&options.upstream_predict_path,
		)?;
		let client_js_src = if options.client_dir.join(CLIENT_JS_FILE).is_file() {
			Some(format!("/js/{}", CLIENT_JS_FILE))
		} else {
			log::warn!(
				"{} not found in {}, pages will be served without the client",
				CLIENT_JS_FILE,
				options.client_dir.display(),
			);
			None
		};
		Ok(Context {
			options,
			upstream,
			client_js_src,
		})
	}
}

pub async fn handle(context: Arc<Context>, request: Request<Body>) -> Response<Body> {
	let method = request.method().clone();
	let path = request.uri().path().to_owned();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &[""]) => self::pages::index::get(&context, request).await,
		(&Method::POST, &[""]) => self::pages::index::post(&context, request).await,
		(&Method::GET, &["api", "health"]) => self::api::health::get(&context, request).await,
		(&Method::POST, &["predict"]) => self::api::predict::post(&context, request).await,
		(&Method::GET, &["health"]) => self::pages::health::get(&context, request).await,
		(&Method::GET, &["styles.css"]) => self::assets::styles(&context, request).await,
		(&Method::GET, &["js", file_name]) => {
			self::assets::client_js(&context, request, file_name).await
		}
		_ => Err(Error::NotFound.into()),
	};
	match result {
		Ok(response) => response,
		Err(error) => error_response(error),
	}
}

fn error_response(error: anyhow::Error) -> Response<Body> {
	let (status, body) = match error.downcast_ref::<Error>() {
		Some(Error::BadRequest) => (StatusCode::BAD_REQUEST, "bad request".to_owned()),
		Some(Error::NotFound) => (StatusCode::NOT_FOUND, "not found".to_owned()),
		Some(Error::BadGateway { message }) => (StatusCode::BAD_GATEWAY, message.clone()),
		None => {
			log::error!("{}", error);
			let body = if cfg!(debug_assertions) {
				error.to_string()
			} else {
				"internal server error".to_owned()
			};
			(StatusCode::INTERNAL_SERVER_ERROR, body)
		}
	};
	let mut response = Response::new(Body::from(body));
	*response.status_mut() = status;
	response
}

pub fn run(options: Options) -> Result<()> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()?
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> Result<()> {
	let context = Context::new(options)?;
	let addr = SocketAddr::new(context.options.host, context.options.port);
	log::info!("forwarding predictions to {}", context.options.upstream_url);
	predictor_util::serve::serve(addr, context, handle).await
}
