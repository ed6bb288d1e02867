//! Reshaping of search service responses for display

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{SearchError, SearchResult};
use super::FACET_FIELD;

const COUNT_FIELD: &str = "@odata.count";
const FACETS_FIELD: &str = "@search.facets";
const VALUE_FIELD: &str = "value";

/// One bucket of a facet: a value and how many documents carry it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetBucket {
    pub value: String,
    pub count: u64,
}

/// Everything a results page needs from one query
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub hit_count: u64,
    pub facets: Vec<FacetBucket>,
    /// Result documents, passed through untouched
    pub results: Vec<Map<String, Value>>,
}

/// Extract hit count, author facet buckets and result documents
pub fn shape_search_response(response: &Value) -> SearchResult<SearchPage> {
    let hit_count = response
        .get(COUNT_FIELD)
        .ok_or_else(|| SearchError::MissingField(COUNT_FIELD.to_string()))?
        .as_u64()
        .ok_or_else(|| SearchError::Decode(format!("{} is not a count", COUNT_FIELD)))?;

    let facet_path = format!("{}.{}", FACETS_FIELD, FACET_FIELD);
    let buckets = response
        .get(FACETS_FIELD)
        .and_then(|facets| facets.get(FACET_FIELD))
        .ok_or_else(|| SearchError::MissingField(facet_path.clone()))?
        .as_array()
        .ok_or_else(|| SearchError::Decode(format!("{} is not a list", facet_path)))?;

    let facets = buckets
        .iter()
        .map(facet_bucket)
        .collect::<SearchResult<Vec<_>>>()?;

    let results = response
        .get(VALUE_FIELD)
        .ok_or_else(|| SearchError::MissingField(VALUE_FIELD.to_string()))?
        .as_array()
        .ok_or_else(|| SearchError::Decode(format!("{} is not a list", VALUE_FIELD)))?
        .iter()
        .map(|doc| match doc {
            Value::Object(fields) => Ok(fields.clone()),
            _ => Err(SearchError::Decode("result document is not an object".to_string())),
        })
        .collect::<SearchResult<Vec<_>>>()?;

    Ok(SearchPage {
        hit_count,
        facets,
        results,
    })
}

fn facet_bucket(bucket: &Value) -> SearchResult<FacetBucket> {
    let value = match bucket.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(SearchError::MissingField("facet value".to_string())),
    };
    let count = bucket
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| SearchError::MissingField("facet count".to_string()))?;

    Ok(FacetBucket { value, count })
}

/// Sorted, two-space indented JSON text. `None` produces no output.
pub fn render_json(response: Option<&Value>) -> SearchResult<Option<String>> {
    response
        .map(|value| serde_json::to_string_pretty(value).map_err(SearchError::from))
        .transpose()
}
