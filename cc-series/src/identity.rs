use crate::error::AggregateError;

/// Default upper bound on identities per aggregation request.
pub const DEFAULT_MAX_IDENTITIES: usize = 10;

/// Account names are ASCII letters, digits, `-`, `_` and `.`, and never
/// made of dots alone.
fn is_valid_identity(identity: &str) -> bool {
    identity
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        && !identity.bytes().all(|b| b == b'.')
}

/// Split a comma-delimited identity list.
///
/// Segments are trimmed, empty segments dropped, and repeated identities
/// kept only once (first occurrence wins, compared ignoring ASCII case since
/// account names are case-insensitive) so nobody is counted twice.
/// Rejects malformed identities, an empty list or one longer than `max`.
pub fn parse_identities(raw: &str, max: usize) -> Result<Vec<String>, AggregateError> {
    let mut identities: Vec<String> = Vec::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !is_valid_identity(segment) {
            return Err(AggregateError::InvalidInput(format!(
                "invalid identity {:?}",
                segment
            )));
        }
        if !identities.iter().any(|known| known.eq_ignore_ascii_case(segment)) {
            identities.push(segment.to_string());
        }
    }
    if identities.is_empty() {
        return Err(AggregateError::InvalidInput(
            "at least one identity is required".to_string(),
        ));
    }
    if identities.len() > max {
        return Err(AggregateError::InvalidInput(format!(
            "{} identities requested, at most {} allowed",
            identities.len(),
            max
        )));
    }
    Ok(identities)
}

/// Order- and case-independent key for a request over `identities`.
pub fn request_key(identities: &[String]) -> String {
    let mut sorted: Vec<String> = identities.iter().map(|id| id.to_ascii_lowercase()).collect();
    sorted.sort_unstable();
    sorted.join(",")
}
