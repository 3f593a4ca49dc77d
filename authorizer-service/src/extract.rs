use serde_json::Value;

const BEARER_PREFIX: &str = "Bearer ";

/// Locates the bearer token in either supported event shape: the `headers`
/// map of an HTTP v2 event (case-insensitive `authorization` key), falling
/// back to the top-level `authorizationToken` field of a REST event.
/// Pure function of the event; empty values count as absent.
pub fn extract_token(event: &Value) -> Option<String> {
    let raw = header_value(event)
        .or_else(|| event.get("authorizationToken").and_then(Value::as_str))?;

    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn header_value(event: &Value) -> Option<&str> {
    event
        .get("headers")?
        .as_object()?
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .and_then(|(_, value)| value.as_str())
}
