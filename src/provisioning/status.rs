//! Summaries of indexer status responses

use serde_json::Value;

/// One-line summary of an indexer status response, if it is one
pub fn describe_indexer_status(response: &Value) -> Option<&'static str> {
    let status = response.get("status")?.as_str()?;
    // Status responses always carry the execution history
    response.get("executionHistory")?;

    let summary = match status.to_ascii_lowercase().as_str() {
        "error" => "Indexer has error status. Check the service portal to understand the error.",
        "running" => "Indexer is running",
        "unknown" => "Indexer status is unknown",
        _ => "No indexer information",
    };
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        let test_cases = vec![
            ("error", "Indexer has error status. Check the service portal to understand the error."),
            ("running", "Indexer is running"),
            ("unknown", "Indexer status is unknown"),
            ("stopped", "No indexer information"),
        ];

        for (status, expected) in test_cases {
            let response = json!({"status": status, "executionHistory": []});
            assert_eq!(describe_indexer_status(&response), Some(expected));
        }
    }

    #[test]
    fn test_non_status_response() {
        assert_eq!(describe_indexer_status(&json!({"name": "margies-indexer"})), None);
        assert_eq!(describe_indexer_status(&json!({"status": "running"})), None);
    }
}
