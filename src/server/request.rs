use std::io::{self, BufRead, Read};

use http::Method;
use tracing::debug;

use crate::error::HttpError;

/// First line of an HTTP request: `METHOD SP PATH SP VERSION`.
///
/// The path may still carry an embedded `?query`; splitting that off is the
/// dispatcher's decision, not the parser's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub path: String,
    pub version: String,
}

/// Headers observed before the blank separator line.
///
/// Only `Content-Length` is interpreted; every other line is retained raw
/// for diagnostics.
#[derive(Debug, Default)]
pub struct Headers {
    /// Declared body length, 0 when the header is absent
    pub content_length: usize,
    /// All header lines as received, in order
    pub raw: Vec<String>,
}

/// Read one CRLF- (or LF-) terminated line, without its terminator.
///
/// `Ok(None)` signals end of stream before any byte of a line arrived.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Read and split the request line.
///
/// This is a strict-format parser: exactly three single-space-separated
/// tokens, no tolerance for extra whitespace. `Ok(None)` means the client
/// closed the connection before sending anything; the caller must terminate
/// without writing a response.
///
/// # Errors
///
/// `MalformedRequestLine` when the token count is wrong or the method token
/// is not a valid HTTP method.
pub fn read_request_line<R: BufRead>(reader: &mut R) -> Result<Option<RequestLine>, HttpError> {
    let Some(line) = read_line(reader)? else {
        return Ok(None);
    };
    debug!(request_line = %line, "request line received");

    let mut tokens = line.split(' ');
    let parsed = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(path), Some(version), None) => {
            method.parse::<Method>().ok().map(|method| RequestLine {
                method,
                path: path.to_string(),
                version: version.to_string(),
            })
        }
        _ => None,
    };
    match parsed {
        Some(request_line) => Ok(Some(request_line)),
        None => Err(HttpError::MalformedRequestLine { line }),
    }
}

/// Read header lines until the blank separator (or end of stream).
///
/// A line whose name before the first colon is exactly `Content-Length` has
/// its value parsed; everything else is only logged and kept raw.
///
/// # Errors
///
/// `MalformedHeader` when a `Content-Length` value does not parse as an
/// integer.
pub fn read_headers<R: BufRead>(reader: &mut R) -> Result<Headers, HttpError> {
    let mut headers = Headers::default();
    loop {
        let Some(line) = read_line(reader)? else {
            break;
        };
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim() == "Content-Length" {
                headers.content_length =
                    value.trim().parse().map_err(|_| HttpError::MalformedHeader {
                        line: line.clone(),
                    })?;
            }
        }
        debug!(header = %line, "header received");
        headers.raw.push(line);
    }
    Ok(headers)
}

/// Read exactly `content_length` bytes of request body.
///
/// Non-UTF-8 bytes are replaced rather than rejected; form bodies from the
/// served pages are plain ASCII.
pub fn read_body<R: BufRead>(reader: &mut R, content_length: usize) -> Result<String, HttpError> {
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
