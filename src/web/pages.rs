//! HTML pages
//!
//! The pages are small enough that they are assembled with `format!`; all
//! text that comes from the user or the search service goes through
//! [`escape`].

use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::search::{SearchPage, SortKey};

const TITLE: &str = "Margie's Travel";

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
<header><h1><a href="/">{title}</a></h1></header>
{body}
</body>
</html>
"#,
        title = escape(TITLE),
        body = body
    )
}

fn search_form(search_terms: &str) -> String {
    format!(
        r#"<form action="/search" method="get" class="search-form">
<input type="text" name="search" value="{}" placeholder="Search documents">
<button type="submit">Search</button>
</form>"#,
        escape(search_terms)
    )
}

/// Landing page
pub fn landing_page() -> String {
    layout(&search_form(""))
}

/// Generic error page
pub fn error_page(message: &str) -> String {
    layout(&format!(
        r#"<section class="error">
<h2>Something went wrong</h2>
<p>{}</p>
<p><a href="/">Start a new search</a></p>
</section>"#,
        escape(message)
    ))
}

/// Where a results page came from
#[derive(Debug, Clone, Default)]
pub struct ResultsContext<'a> {
    pub search_terms: &'a str,
    /// Active facet value on the filter path
    pub facet: Option<&'a str>,
    /// Active sort on the filter path; `None` on the plain search path
    pub sort: Option<SortKey>,
}

fn filter_link(search_terms: &str, facet: Option<&str>, sort: Option<SortKey>) -> String {
    let mut link = format!("/filter?search={}", urlencoding::encode(search_terms));
    if let Some(facet) = facet {
        link.push_str("&facet=");
        link.push_str(&urlencoding::encode(facet));
    }
    if let Some(sort) = sort {
        link.push_str("&sort=");
        link.push_str(sort.field_name());
    }
    link
}

fn facet_list(page: &SearchPage, ctx: &ResultsContext<'_>) -> String {
    let items = page
        .facets
        .iter()
        .map(|bucket| {
            let class = if ctx.facet == Some(bucket.value.as_str()) {
                r#" class="selected""#
            } else {
                ""
            };
            format!(
                r#"<li{}><a href="{}">{}</a> ({})</li>"#,
                class,
                escape(&filter_link(ctx.search_terms, Some(&bucket.value), ctx.sort)),
                escape(&bucket.value),
                bucket.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<aside class=\"facets\">\n<h3>Author</h3>\n<ul>\n{}\n</ul>\n</aside>",
        items
    )
}

fn sort_options(ctx: &ResultsContext<'_>) -> String {
    let active = ctx.sort.unwrap_or_default();
    let items = SortKey::iter()
        .map(|key| {
            if key == active {
                format!(r#"<li class="selected">{}</li>"#, escape(key.label()))
            } else {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    escape(&filter_link(ctx.search_terms, ctx.facet, Some(key))),
                    escape(key.label())
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<nav class=\"sort\" data-sort-field=\"{}\">\n<span>Sort by:</span>\n<ul>\n{}\n</ul>\n</nav>",
        active.field_name(),
        items
    )
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

fn result_item(doc: &Map<String, Value>) -> String {
    let mut html = String::from("<li class=\"result\">\n");

    let name = doc
        .get("file_name")
        .and_then(scalar_text)
        .unwrap_or_else(|| "(untitled)".to_string());
    match doc.get("url").and_then(Value::as_str) {
        Some(url) => html.push_str(&format!(
            "<h4><a href=\"{}\">{}</a></h4>\n",
            escape(url),
            escape(&name)
        )),
        None => html.push_str(&format!("<h4>{}</h4>\n", escape(&name))),
    }

    let details: Vec<String> = ["author", "size", "last_modified", "language", "sentiment"]
        .iter()
        .filter_map(|field| {
            doc.get(*field)
                .and_then(scalar_text)
                .map(|text| format!("<dt>{}</dt><dd>{}</dd>", field, escape(&text)))
        })
        .collect();
    if !details.is_empty() {
        html.push_str(&format!("<dl>{}</dl>\n", details.join("")));
    }

    if let Some(highlights) = doc.get("@search.highlights") {
        for field in ["content", "image_captions"] {
            for snippet in highlights.get(field).map(string_list).unwrap_or_default() {
                // Highlight snippets carry <em> markup from the service
                let snippet = escape(&snippet)
                    .replace("&lt;em&gt;", "<em>")
                    .replace("&lt;/em&gt;", "</em>");
                html.push_str(&format!("<blockquote>{}</blockquote>\n", snippet));
            }
        }
    }

    for field in ["key_phrases", "locations", "image_captions"] {
        let values = doc.get(field).map(string_list).unwrap_or_default();
        if !values.is_empty() {
            let joined = values.iter().map(|v| escape(v)).collect::<Vec<_>>().join(", ");
            html.push_str(&format!("<p class=\"{}\">{}</p>\n", field, joined));
        }
    }

    html.push_str("</li>");
    html
}

/// Results page for both the search and filter paths
pub fn results_page(page: &SearchPage, ctx: &ResultsContext<'_>) -> String {
    let results = page
        .results
        .iter()
        .map(result_item)
        .collect::<Vec<_>>()
        .join("\n");

    layout(&format!(
        "{form}\n<p class=\"hit-count\">{hits} matching documents</p>\n{facets}\n{sort}\n<ol class=\"results\">\n{results}\n</ol>",
        form = search_form(ctx.search_terms),
        hits = page.hit_count,
        facets = facet_list(page, ctx),
        sort = sort_options(ctx),
        results = results
    ))
}
