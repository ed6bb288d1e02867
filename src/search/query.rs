//! Search query building
//!
//! Turns raw user input into the query parameters the search service
//! understands. Two shapes exist: the plain search used by `/search` and
//! the filtered/sorted search used by `/filter`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use super::{FACET_FIELD, HIGHLIGHT_FIELDS};

/// Sort keys offered on the results page
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Service-native score ranking
    #[default]
    Relevance,
    FileName,
    Size,
    Date,
    Sentiment,
}

impl SortKey {
    /// Parse a user-supplied sort key. Absent or unrecognized values fall
    /// back to relevance.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Order-by clause sent to the service
    pub fn order_by(self) -> &'static str {
        match self {
            SortKey::Relevance => "search.score() desc",
            SortKey::FileName => "name asc",
            SortKey::Size => "size desc",
            SortKey::Date => "last_modified desc",
            SortKey::Sentiment => "sentiment desc",
        }
    }

    /// Name echoed back to the results page
    pub fn field_name(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::FileName => "file_name",
            SortKey::Size => "size",
            SortKey::Date => "date",
            SortKey::Sentiment => "sentiment",
        }
    }

    /// Label shown in the sort selector
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevance",
            SortKey::FileName => "File name",
            SortKey::Size => "Largest file size",
            SortKey::Date => "Most recently modified",
            SortKey::Sentiment => "Positive to negative",
        }
    }
}

/// Filter clause over the author facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpression {
    /// Documents whose author equals the selected facet value
    AuthorEquals(String),
    /// Every document that has an author
    AuthorNotNull,
}

impl FilterExpression {
    pub fn for_facet(facet_value: Option<&str>) -> Self {
        match facet_value {
            Some(value) => FilterExpression::AuthorEquals(value.to_string()),
            None => FilterExpression::AuthorNotNull,
        }
    }

    /// OData text of the clause. Single quotes in the facet value are doubled
    /// so the value stays inside its string literal.
    pub fn to_odata(&self) -> String {
        match self {
            FilterExpression::AuthorEquals(value) => {
                format!("{} eq '{}'", FACET_FIELD, value.replace('\'', "''"))
            }
            FilterExpression::AuthorNotNull => format!("{} ne null", FACET_FIELD),
        }
    }
}

/// Ordered query parameters, stored unencoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    params: Vec<(&'static str, String)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.params.push((name, value.into()));
        self
    }

    /// Unencoded value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Percent-encoded `name=value&...` string in insertion order
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn base_params(search_terms: &str, query_type: &str) -> QueryParameters {
    let mut params = QueryParameters::new();
    params
        .push("search", search_terms)
        .push("searchMode", "All")
        .push("$count", "true")
        .push("queryType", query_type)
        .push("$select", "*")
        .push("facet", FACET_FIELD);
    params
}

/// Parameters for the plain search path
pub fn build_search_params(search_terms: &str, api_version: &str) -> QueryParameters {
    let mut params = base_params(search_terms, "simple");
    params
        .push("highlight", HIGHLIGHT_FIELDS)
        .push("api-version", api_version);
    params
}

/// Parameters for the filtered/sorted search path
pub fn build_filter_params(
    search_terms: &str,
    facet_value: Option<&str>,
    sort: SortKey,
    api_version: &str,
) -> QueryParameters {
    let mut params = base_params(search_terms, "full");
    params
        .push("$filter", FilterExpression::for_facet(facet_value).to_odata())
        .push("$orderby", sort.order_by())
        .push("highlight", HIGHLIGHT_FIELDS)
        .push("api-version", api_version);
    params
}
