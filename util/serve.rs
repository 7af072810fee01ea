use crate::error::Result;
use backtrace::Backtrace;
use futures::FutureExt;
use std::{
	cell::RefCell, convert::Infallible, future::Future, net::SocketAddr, panic::AssertUnwindSafe,
	sync::{Arc, Once},
};

static PANIC_HOOK: Once = Once::new();

tokio::task_local! {
	static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
}

/// Bind `addr` and serve requests with `request_handler` until the server fails.
pub async fn serve<C, H, F>(
	addr: SocketAddr,
	request_handler_context: C,
	request_handler: H,
) -> Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	let listener = std::net::TcpListener::bind(addr)?;
	log::info!("serving on {}", listener.local_addr()?);
	serve_listener(listener, request_handler_context, request_handler).await
}

/// Serve requests on an already bound listener. A panic in the request handler is caught and answered with a 500 carrying the panic message and backtrace.
pub async fn serve_listener<C, H, F>(
	listener: std::net::TcpListener,
	request_handler_context: C,
	request_handler: H,
) -> Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	async fn service<C, H, F>(
		request_handler: Arc<H>,
		request_handler_context: Arc<C>,
		request: http::Request<hyper::Body>,
	) -> Result<http::Response<hyper::Body>, Infallible>
	where
		C: Send + Sync + 'static,
		H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
		F: Future<Output = http::Response<hyper::Body>> + Send,
	{
		let method = request.method().clone();
		let path = request.uri().path().to_owned();
		let result = AssertUnwindSafe(request_handler(request_handler_context, request))
			.catch_unwind()
			.await;
		let response = result.unwrap_or_else(|_| {
			let body = PANIC_MESSAGE_AND_BACKTRACE
				.with(|panic_message_and_backtrace| {
					panic_message_and_backtrace
						.borrow()
						.as_ref()
						.map(|(message, backtrace)| format!("{}\n{:?}", message, backtrace))
				})
				.unwrap_or_else(|| "internal server error".to_owned());
			log::error!("{} {} panicked: {}", method, path, body);
			let mut response = http::Response::new(hyper::Body::from(body));
			*response.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
			response
		});
		log::info!("{} {} {}", method, path, response.status().as_u16());
		Ok(response)
	}
	install_panic_hook();
	let request_handler = Arc::new(request_handler);
	let request_handler_context = Arc::new(request_handler_context);
	let service = hyper::service::make_service_fn(|_| {
		let request_handler = request_handler.clone();
		let request_handler_context = request_handler_context.clone();
		async move {
			Ok::<_, Infallible>(hyper::service::service_fn(move |request| {
				let request_handler = request_handler.clone();
				let request_handler_context = request_handler_context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					service(request_handler, request_handler_context, request).await
				})
			}))
		}
	});
	hyper::Server::from_tcp(listener)?.serve(service).await?;
	Ok(())
}

/// Record the panic message and backtrace for the task that panicked. Panics outside a request go to the previous hook. The hook is installed once per process however many servers run.
fn install_panic_hook() {
	PANIC_HOOK.call_once(|| {
		let previous_hook = std::panic::take_hook();
		std::panic::set_hook(Box::new(move |panic_info| {
			let value = (panic_info.to_string(), Backtrace::new());
			let recorded = PANIC_MESSAGE_AND_BACKTRACE.try_with(|panic_message_and_backtrace| {
				panic_message_and_backtrace.borrow_mut().replace(value);
			});
			if recorded.is_err() {
				previous_hook(panic_info);
			}
		}));
	});
}

#[tokio::test]
async fn test_serve_catches_panics() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(serve_listener(
		listener,
		(),
		|_: Arc<()>, request: http::Request<hyper::Body>| async move {
			if request.uri().path() == "/panic" {
				panic!("the handler panicked");
			}
			http::Response::new(hyper::Body::from("ok"))
		},
	));
	let response = reqwest::get(format!("http://{}/panic", addr)).await.unwrap();
	assert_eq!(response.status().as_u16(), 500);
	assert!(response
		.text()
		.await
		.unwrap()
		.contains("the handler panicked"));
	let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_servers_share_one_panic_hook() {
	let mut addrs = Vec::new();
	for _ in 0..2 {
		let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
		addrs.push(listener.local_addr().unwrap());
		tokio::spawn(serve_listener(
			listener,
			(),
			|_: Arc<()>, request: http::Request<hyper::Body>| async move {
				if request.uri().path() == "/panic" {
					panic!("the handler panicked");
				}
				http::Response::new(hyper::Body::empty())
			},
		));
	}
	for addr in addrs {
		let response = reqwest::get(format!("http://{}/panic", addr)).await.unwrap();
		assert_eq!(response.status().as_u16(), 500);
		let body = response.text().await.unwrap();
		assert_eq!(body.matches("the handler panicked").count(), 1);
	}
	assert!(PANIC_HOOK.is_completed());
}
