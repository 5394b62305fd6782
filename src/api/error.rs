use std::fmt;

/// Errors returned by the Flickr REST client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response at all (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-2xx status.
    Http { status: u16, message: String },
    /// Body arrived but could not be decoded into the expected shape.
    Decode(String),
    /// Flickr answered 200 with `stat: "fail"`.
    Api { code: i64, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http { status, message } => {
                write!(f, "HTTP error ({status}): {message}")
            }
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
            ApiError::Api { code, message } => write!(f, "Flickr error {code}: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}
