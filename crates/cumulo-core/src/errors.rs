use thiserror::Error;

/// Failures reported by an [`ImagesService`](crate::ImagesService)
/// implementation.
///
/// The scripting layer propagates the `Display` text of these verbatim into
/// the script as a runtime error, so messages are written for script authors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The referenced record does not exist on the service.
    #[error("{what} not found: {key}")]
    NotFound {
        what: &'static str,
        key: String,
    },
    /// The service rejected the request as invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Transport or provider failure, message passed through unchanged.
    #[error("{0}")]
    Service(String),
}

impl ApiError {
    /// Convenience constructor for a missing image.
    pub fn image_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            what: "image",
            key: key.to_string(),
        }
    }
}
