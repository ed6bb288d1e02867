//! Tracing subscriber setup shared by the web server and the CLI

use crate::config::ObservabilityConfig;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    /// Keeps stdout free for command output
    Stderr,
}

fn make_writer(output: LogOutput) -> BoxMakeWriter {
    match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    }
}

/// Default filter directives when RUST_LOG is not set
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "search_portal={level},search_provision={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. RUST_LOG takes precedence over the
/// configured level.
pub fn init_tracing(config: &ObservabilityConfig, output: LogOutput) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config).into());

    let (json_layer, text_layer) = if config.json_logs {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(make_writer(output))),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(make_writer(output))),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
