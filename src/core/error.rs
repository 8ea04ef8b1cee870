use std::fmt;
use std::io;
use std::result;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Argument(String),
    Io(String),
    Network(String),
    State(String),
    Protocol(String),
    Remote {
        status : u16,
        message: Option<String>,
    },
}

impl Error {
    /// Message carried by the backend's JSON error body, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Error::Remote { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Argument(msg)    => write!(f, "{}", msg),
            Error::Io(msg)          => write!(f, "{}", msg),
            Error::Network(msg)     => write!(f, "{}", msg),
            Error::State(msg)       => write!(f, "{}", msg),
            Error::Protocol(msg)    => write!(f, "{}", msg),
            Error::Remote { status, message } => match message {
                Some(msg) => write!(f, "{}", msg),
                None => write!(f, "Http error: status {}", status),
            },
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(format!("IO error: {}", err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Argument(format!("Invalid url: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(format!("Http error: sending http request error {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(format!("Http error: deserialize json error {}", err))
    }
}

pub type Result<T> = result::Result<T, Error>;
