use thiserror::Error;

/// Transport-level failures raised by the HTTP gateway.
///
/// Messages are the fixed human-readable strings shown to the user; the raw
/// provider body is never surfaced verbatim for throttling/auth failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("too many requests, retry later")]
    RateLimited,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("subscription/access denied")]
    Forbidden,
    /// Provider rejected the parameters; carries the provider detail when
    /// one was parseable, otherwise a generic message.
    #[error("{0}")]
    BadRequest(String),
    /// No HTTP response at all (DNS failure, refused connection, timeout).
    #[error("network error")]
    NetworkUnavailable,
    /// Any other non-2xx status.
    #[error("{0}")]
    ProviderError(String),
}

/// Failures surfaced by the typed flight-data operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Provider answered 2xx but reported `status: false` in the envelope,
    /// or a search context marked the search as failed.
    #[error("{operation} failed")]
    ProviderReportedFailure { operation: &'static str },
    /// Envelope carried `status: true` but no usable `data` payload.
    #[error("{operation} returned no data")]
    EmptyPayload { operation: &'static str },
    #[error("could not decode {operation} response: {source}")]
    ResponseDecode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InvalidArgument(String),
}
