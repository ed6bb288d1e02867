//! Client side of the hosted search service
//!
//! The search module covers one request/response cycle against the
//! service's REST API:
//!
//! - **Query building**: user input to the service's query grammar
//!   ([`build_search_params`], [`build_filter_params`])
//! - **Gateway**: one HTTPS request with the `api-key` header
//!   ([`SearchGateway`])
//! - **Response shaping**: hit count, author facet and result documents
//!   ([`shape_search_response`]), or pretty JSON for the CLI
//!   ([`render_json`])
//!
//! ```text
//!  user input ──► query ──► gateway ──► response ──► page / stdout
//! ```
//!
//! # Example
//!
//! ```no_run
//! use search_portal::config::Config;
//! use search_portal::search::{build_filter_params, shape_search_response, SearchGateway, SortKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let gateway = SearchGateway::new(&config.service)?;
//!
//!     let params = build_filter_params("london", None, SortKey::Date, &config.service.api_version);
//!     if let Some(response) = gateway.query_index(&config.service.index_name, &params).await? {
//!         let page = shape_search_response(&response)?;
//!         println!("{} hits", page.hit_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gateway;
pub mod query;
pub mod response;

pub use error::{SearchError, SearchResult};
pub use gateway::SearchGateway;
pub use query::{build_filter_params, build_search_params, FilterExpression, QueryParameters, SortKey};
pub use response::{render_json, shape_search_response, FacetBucket, SearchPage};

/// REST API version every request is pinned to
pub const API_VERSION: &str = "2020-06-30-Preview";

/// Field faceted on and filtered by
pub const FACET_FIELD: &str = "author";

/// Fields highlighted in results, with the number of snippets for each
pub const HIGHLIGHT_FIELDS: &str = "content-3,image_captions-3";
