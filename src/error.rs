// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// The request never produced a response (connect, timeout, body read).
    Http(String),
    /// The backend kept answering with a 5xx status.
    Server { status: u16 },
    /// The backend answered with a non-success status. `message` holds the
    /// `error` field of the JSON body when the backend supplied one.
    Api { status: u16, message: Option<String> },
    /// The response body did not have the expected shape.
    Decode(String),
}

impl Error {
    /// Whether another attempt could succeed.
    ///
    /// Transport failures and server errors are transient; anything the
    /// backend rejected explicitly is not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Server { .. })
    }

    /// Message provided by the backend, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Builds the error for a non-success response from its status and body.
    ///
    /// The backend reports failures as `{"error": "..."}`; any other body is
    /// ignored so callers can fall back to a localized message.
    #[must_use]
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|message| !message.is_empty());
        Error::Api { status, message }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Server { status } => write!(f, "Server error: {}", status),
            Error::Api {
                status,
                message: Some(message),
            } => write!(f, "API Error {}: {}", status, message),
            Error::Api {
                status,
                message: None,
            } => write!(f, "API Error {}", status),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
