use crate::error::{AppError, Result};
use crate::search::{
    build_filter_params, build_search_params, shape_search_response, QueryParameters, SearchError,
    SearchPage, SortKey,
};
use crate::web::pages::{self, ResultsContext};
use crate::web::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Landing page
pub async fn home() -> Html<String> {
    Html(pages::landing_page())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub search: Option<String>,
    pub facet: Option<String>,
    pub sort: Option<String>,
}

fn require_terms(search: Option<String>) -> Result<String> {
    search.ok_or_else(|| AppError::Validation("missing 'search' parameter".to_string()))
}

async fn run_query(state: &AppState, params: &QueryParameters) -> Result<SearchPage> {
    let response = state
        .gateway
        .query_index(&state.index_name, params)
        .await?
        .ok_or_else(|| SearchError::Decode("empty response body".to_string()))?;

    let page = shape_search_response(&response)?;
    info!(
        index = %state.index_name,
        hit_count = page.hit_count,
        facet_count = page.facets.len(),
        "Search completed"
    );
    Ok(page)
}

/// Plain search
pub async fn search(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(query) = query?;
    let search_terms = require_terms(query.search)?;

    let params = build_search_params(&search_terms, &state.api_version);
    let page = run_query(&state, &params).await?;

    let ctx = ResultsContext {
        search_terms: &search_terms,
        facet: None,
        sort: None,
    };
    Ok(Html(pages::results_page(&page, &ctx)))
}

/// Search narrowed by author facet and ordered by a sort key
pub async fn filter(
    State(state): State<AppState>,
    query: std::result::Result<Query<FilterQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(query) = query?;
    let search_terms = require_terms(query.search)?;
    let sort = SortKey::parse_or_default(query.sort.as_deref());

    let params = build_filter_params(
        &search_terms,
        query.facet.as_deref(),
        sort,
        &state.api_version,
    );
    let page = run_query(&state, &params).await?;

    let ctx = ResultsContext {
        search_terms: &search_terms,
        facet: query.facet.as_deref(),
        sort: Some(sort),
    };
    Ok(Html(pages::results_page(&page, &ctx)))
}
