use std::fmt;

/// Why a single identity's series could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request never produced a response (connect, timeout, body read).
    Transport(String),
    /// The upstream answered with a non-success HTTP status.
    Status(u16),
    /// The response body was not a contribution payload.
    Decode(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport error: {msg}"),
            SourceError::Status(code) => write!(f, "upstream returned HTTP {code}"),
            SourceError::Decode(msg) => write!(f, "malformed upstream payload: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Failures of an aggregation request.
///
/// An empty result is not an error: identities without contributions give
/// an empty series and render as an empty calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The identity list was empty or longer than allowed.
    InvalidInput(String),
    /// Fetching one identity failed; the whole aggregation is abandoned.
    UpstreamFailure { identity: String, reason: SourceError },
}

impl AggregateError {
    /// Stable machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AggregateError::InvalidInput(_) => "invalid_input",
            AggregateError::UpstreamFailure { .. } => "upstream_failure",
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AggregateError::UpstreamFailure { identity, reason } => {
                write!(f, "fetching contributions for '{identity}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregateError::InvalidInput(_) => None,
            AggregateError::UpstreamFailure { reason, .. } => Some(reason),
        }
    }
}
