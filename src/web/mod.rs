pub mod handlers;
pub mod pages;
pub mod routes;

pub use routes::*;

use crate::search::SearchGateway;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SearchGateway>,
    pub index_name: Arc<str>,
    pub api_version: Arc<str>,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(gateway: Arc<SearchGateway>, index_name: &str, api_version: &str) -> Self {
        Self {
            gateway,
            index_name: Arc::from(index_name),
            api_version: Arc::from(api_version),
            static_dir: None,
        }
    }

    /// Serve files from this directory under /static
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }
}
