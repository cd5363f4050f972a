use thiserror::Error;

/// Fatal conditions raised while talking to the imagery provider.
///
/// These abort the fetch for the affected coordinate only; a body that is
/// not a decodable image is a soft condition and never surfaces here.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("imagery provider returned HTTP {0}")]
    Status(u16),

    #[error("metadata response was not valid JSON: {0}")]
    Metadata(String),

    /// The provider rejected the API key. Every lookup in the batch would
    /// fail the same way, so callers treat this as batch-fatal.
    #[error("request denied by imagery provider: {0}")]
    Denied(String),
}
