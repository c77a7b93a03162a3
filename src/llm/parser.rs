pub const NO_DETAILS: &str = "No detailed information available.";

/// Splits a completion at its first blank line into (summary, details).
pub fn split_summary_details(response: &str) -> (String, String) {
    match response.split_once("\n\n") {
        Some((summary, details)) => (summary.to_string(), details.to_string()),
        None => (response.to_string(), NO_DETAILS.to_string()),
    }
}
