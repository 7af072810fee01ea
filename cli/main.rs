//! This module contains the main entrypoint to the predictor cli.

use clap::{Args, Parser};
use colored::Colorize;
use predictor_util::error::Result;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[clap(
	about = "Serve a form that sends feature values to a model service and shows its predictions.",
	disable_help_subcommand = true
)]
enum Options {
	#[clap(name = "serve")]
	Serve(ServeOptions),
}

#[derive(Args)]
#[clap(about = "run the predictor web app")]
#[clap(long_about = "run the predictor web app in front of a model service")]
struct ServeOptions {
	#[clap(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
	#[clap(
		long,
		env = "PREDICTOR_UPSTREAM_URL",
		default_value = "http://127.0.0.1:5000",
		help = "the url of the model service"
	)]
	upstream_url: Url,
	#[clap(
		long,
		env = "PREDICTOR_UPSTREAM_HEALTH_PATH",
		default_value = "/",
		help = "the path the model service reports its feature names on"
	)]
	upstream_health_path: String,
	#[clap(
		long,
		env = "PREDICTOR_UPSTREAM_PREDICT_PATH",
		default_value = "/predict",
		help = "the path the model service accepts predictions on"
	)]
	upstream_predict_path: String,
	#[clap(
		long,
		env = "PREDICTOR_CLIENT_DIR",
		default_value = "build/client",
		help = "the directory holding the wasm-bindgen output of the client"
	)]
	client_dir: PathBuf,
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let options = Options::parse();
	let result = match options {
		Options::Serve(options) => cli_serve(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_serve(options: ServeOptions) -> Result<()> {
	predictor_app::run(predictor_app::Options {
		client_dir: options.client_dir,
		host: options.host,
		port: options.port,
		upstream_url: options.upstream_url,
		upstream_health_path: options.upstream_health_path,
		upstream_predict_path: options.upstream_predict_path,
	})
}

#[test]
fn test_serve_options() {
	let Options::Serve(options) = Options::try_parse_from(&[
		"predictor",
		"serve",
		"--port",
		"9000",
		"--upstream-url",
		"http://models.internal:5000",
		"--upstream-health-path",
		"/health",
	])
	.unwrap();
	assert_eq!(options.port, 9000);
	assert_eq!(options.upstream_url.as_str(), "http://models.internal:5000/");
	assert_eq!(options.upstream_health_path, "/health");
	assert_eq!(options.upstream_predict_path, "/predict");
	assert_eq!(options.client_dir, PathBuf::from("build/client"));
}
