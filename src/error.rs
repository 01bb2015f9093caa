use thiserror::Error;

/// Errors that can occur while fetching a page.
///
/// `InvalidUrl` is raised before any network call; the other variants map
/// transport-level failures. Retrying is a caller concern, so none of these
/// carry retry hints.
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL is malformed or uses a scheme other than http/https
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server answered with a non-2xx status
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Any other transport failure (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The import was cancelled before the request was issued
    #[error("Cancelled")]
    Cancelled,
}

/// A strategy could not produce a recipe from the document.
///
/// This is a normal, expected outcome over adversarial HTML: the orchestrator
/// converts it into a best-effort result and it never reaches the public API
/// as an error.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ParseFailure(pub String);

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        ParseFailure(message.into())
    }
}

/// AI fallback failures. Logged and swallowed by the orchestrator; the
/// structural result always stands when the fallback misbehaves.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion backend returned an unusable response: {0}")]
    BadResponse(String),

    #[error("Completion provider is not configured: {0}")]
    NotConfigured(String),

    #[error("Cancelled")]
    Cancelled,
}

/// Errors surfaced by the crate's construction paths. Per-URL failures never
/// use this type; they are folded into `ImportResult` instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
