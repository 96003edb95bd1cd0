//! JSON-object extraction from grader completions.
//!
//! The grader is prompted to answer with a bare JSON object, but LLM-style
//! backends routinely wrap it in prose or code fences.  [`extract_json_object`]
//! takes the span from the first `{` to the last `}` — the greedy span keeps
//! nested objects intact without needing a bracket parser.

/// Return the first-`{`-to-last-`}` span of `text`, if one exists.
///
/// The span is not validated here; the caller feeds it to `serde_json` and
/// treats a parse failure as a malformed completion.
///
/// ```
/// use speaking_zone::grader::extract_json_object;
///
/// let body = "Sure! Here is the result:\n{\"score_20_75\": 55}\nGood luck!";
/// assert_eq!(extract_json_object(body), Some("{\"score_20_75\": 55}"));
/// assert_eq!(extract_json_object("no json here"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
