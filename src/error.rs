use std::fmt;
use std::io;

/// Connection-local failure while reading, routing, or answering a request.
///
/// Every variant is terminal for the current connection only; the accept
/// loop is never affected.
#[derive(Debug)]
pub enum HttpError {
    /// The request line did not split into exactly `METHOD PATH VERSION`,
    /// or the method token was not a valid HTTP method.
    MalformedRequestLine {
        /// The offending line as received
        line: String,
    },
    /// A header was syntactically unusable, e.g. a `Content-Length` value
    /// that does not parse as an integer.
    MalformedHeader {
        /// The offending header line
        line: String,
    },
    /// The request was structurally valid but cannot be routed, e.g. a
    /// query-form signup path carrying no query string.
    MalformedRequest {
        /// The request path that could not be dispatched
        path: String,
    },
    /// A static resource does not exist under the document root (or the
    /// path tried to escape it).
    ResourceNotFound {
        /// The URL path that failed to resolve
        path: String,
    },
    /// Socket or filesystem I/O failed mid-request.
    Io(io::Error),
}

impl HttpError {
    /// True for client-side protocol violations that warrant a `400` before
    /// closing the connection.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            HttpError::MalformedRequestLine { .. }
                | HttpError::MalformedHeader { .. }
                | HttpError::MalformedRequest { .. }
        )
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::MalformedRequestLine { line } => {
                write!(f, "malformed request line: '{line}'")
            }
            HttpError::MalformedHeader { line } => {
                write!(f, "malformed header: '{line}'")
            }
            HttpError::MalformedRequest { path } => {
                write!(f, "request for '{path}' could not be dispatched")
            }
            HttpError::ResourceNotFound { path } => {
                write!(f, "no resource under the document root for '{path}'")
            }
            HttpError::Io(err) => write!(f, "connection I/O failed: {err}"),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpError {
    fn from(err: io::Error) -> Self {
        HttpError::Io(err)
    }
}
