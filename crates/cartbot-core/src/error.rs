/// Top-level error type for Cartbot.
///
/// Each variant corresponds to a subsystem that can produce errors. None of
/// them is fatal to the process: the conversation engine turns catalog and
/// session errors into user-facing text, and delivery errors are only
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum CartbotError {
    /// An error related to session persistence or lookup.
    #[error("Session error: {0}")]
    Session(String),

    /// An error from the commerce catalog API, including missing
    /// preconditions such as an unknown user location.
    #[error("Commerce error: {0}")]
    Commerce(String),

    /// An error reported by the messaging platform or its transport.
    #[error("Messenger error: {0}")]
    Messenger(String),

    /// An error from the webhook gateway layer.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from an outbound HTTP request.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`CartbotError`].
pub type CartbotResult<T> = Result<T, CartbotError>;
