use anyhow::Context;
use clap::Parser;
use reqwest::Method;
use search_portal::{
    config::Config,
    provisioning::{describe_indexer_status, load_document, NO_BODY},
    search::{render_json, SearchGateway},
    telemetry::{init_tracing, LogOutput},
};
use std::path::Path;

#[derive(Parser)]
#[command(name = "search-provision")]
#[command(about = "Submit definitions and requests to the search service REST API", long_about = None)]
#[command(version)]
struct Cli {
    /// HTTP request type (GET, POST, PUT, DELETE, ...)
    #[arg(value_name = "REQUEST_TYPE", value_parser = parse_method)]
    request_type: Method,

    /// Service function, e.g. servicestats, indexes/margies-index, indexers/margies-indexer/run
    #[arg(value_name = "FUNCTION_NAME")]
    function_name: String,

    /// JSON request body file, or `null` for requests without a body
    #[arg(value_name = "JSON_FILE")]
    json_file: String,
}

fn parse_method(raw: &str) -> Result<Method, String> {
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
        .map_err(|_| format!("'{}' is not an HTTP request type", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    init_tracing(&config.observability, LogOutput::Stderr);

    let body = if cli.json_file == NO_BODY {
        None
    } else {
        Some(load_document(Path::new(&cli.json_file), &config.secrets)?)
    };

    tracing::info!(
        method = %cli.request_type,
        function = %cli.function_name,
        has_body = body.is_some(),
        "Submitting request"
    );

    let gateway = SearchGateway::new(&config.service)?;
    let result = gateway
        .send(cli.request_type, &cli.function_name, body.as_ref())
        .await?;

    if let Some(text) = render_json(result.as_ref())? {
        println!("{}", text);
    }

    if cli.function_name.trim_end_matches('/').ends_with("/status") {
        if let Some(summary) = result.as_ref().and_then(describe_indexer_status) {
            eprintln!("{}", summary);
        }
    }

    Ok(())
}
