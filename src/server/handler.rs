use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use http::Method;
use may::net::TcpStream;
use tracing::{debug, error, info, warn};

use crate::error::HttpError;
use crate::query_string::parse_query_string;
use crate::server::request::{read_body, read_headers, read_request_line, RequestLine};
use crate::server::response::ResponseWriter;
use crate::static_files::StaticFiles;
use crate::users::{User, UserDirectory};

/// Where the signup and login flows send the browser afterwards.
const HOME_PAGE: &str = "/index.html";
/// Resource served (with a plain 200) when a login attempt fails.
const LOGIN_FAILED_PAGE: &str = "user/login_failed.html";

const NOT_FOUND_BODY: &[u8] = b"<html><body><h1>404 Not Found</h1></body></html>";

/// State shared by every connection coroutine.
pub struct ServerState {
    pub users: UserDirectory,
    pub static_files: StaticFiles,
}

impl ServerState {
    pub fn new<P: Into<PathBuf>>(webapp_root: P) -> Self {
        Self {
            users: UserDirectory::new(),
            static_files: StaticFiles::new(webapp_root),
        }
    }
}

/// Serve one connection end to end over a real socket.
///
/// Failures are connection-local: logged here, never propagated to the
/// accept loop. Both stream halves close when this returns.
pub fn handle_connection(stream: TcpStream, state: &ServerState) {
    let peer = stream.peer_addr().ok();
    debug!(peer = ?peer, "client connected");
    let read_half = match stream.try_clone() {
        Ok(clone) => BufReader::new(clone),
        Err(err) => {
            error!(error = %err, "failed to clone connection stream");
            return;
        }
    };
    if let Err(err) = handle(read_half, stream, state) {
        warn!(peer = ?peer, error = %err, "connection failed");
    }
}

/// Process exactly one request from `reader` and write at most one response
/// to `writer`.
///
/// A client that closed without sending a request line gets no response; a
/// client that sent garbage gets a best-effort `400` before the error is
/// handed back for logging.
pub fn handle<R: BufRead, W: Write>(
    mut reader: R,
    writer: W,
    state: &ServerState,
) -> Result<(), HttpError> {
    let mut response = ResponseWriter::new(writer);
    match serve(&mut reader, &mut response, state) {
        Err(err) if err.is_malformed() => {
            // Best effort; the peer may already be gone.
            if let Err(write_err) = response.bad_request() {
                debug!(error = %write_err, "could not write 400 to failing connection");
            }
            Err(err)
        }
        other => other,
    }
}

fn serve<R: BufRead, W: Write>(
    reader: &mut R,
    response: &mut ResponseWriter<W>,
    state: &ServerState,
) -> Result<(), HttpError> {
    let Some(request_line) = read_request_line(reader)? else {
        debug!("connection closed before a request line was sent");
        return Ok(());
    };
    let RequestLine { method, path, version } = &request_line;
    info!(method = %method, path = %path, version = %version, "request parsed");

    let headers = read_headers(reader)?;

    if path == "/user/create" && *method == Method::POST {
        // Signup fields arrive as a form body of exactly Content-Length bytes.
        let body = read_body(reader, headers.content_length)?;
        let user = User::from_params(&parse_query_string(&body));
        info!(user_id = %user.id, "user signed up via form body");
        state.users.add(user);
        response.redirect(HOME_PAGE)?;
    } else if path.starts_with("/user/create") {
        // Signup fields arrive in the query string, e.g.
        // GET /user/create?userId=a&password=b&name=c&email=d
        let Some((_, query)) = path.split_once('?') else {
            return Err(HttpError::MalformedRequest { path: path.clone() });
        };
        let user = User::from_params(&parse_query_string(query));
        info!(user_id = %user.id, "user signed up via query string");
        state.users.add(user);
        response.redirect(HOME_PAGE)?;
    } else if path == "/user/login" {
        let body = read_body(reader, headers.content_length)?;
        let params = parse_query_string(&body);
        let user_id = params.get("userId").map(String::as_str).unwrap_or_default();
        match state.users.find_by_id(user_id) {
            Some(user) if params.get("password") == Some(&user.password) => {
                info!(user_id = %user_id, "login succeeded");
                response.login_redirect()?;
            }
            found => {
                info!(user_id = %user_id, known_user = found.is_some(), "login failed");
                serve_static(response, state, LOGIN_FAILED_PAGE)?;
            }
        }
    } else {
        serve_static(response, state, path)?;
    }
    Ok(())
}

fn serve_static<W: Write>(
    response: &mut ResponseWriter<W>,
    state: &ServerState,
    path: &str,
) -> Result<(), HttpError> {
    match state.static_files.load(path) {
        Ok((bytes, content_type)) => {
            response.ok(bytes.len(), content_type)?;
            response.body(&bytes)?;
        }
        Err(HttpError::ResourceNotFound { path }) => {
            warn!(path = %path, "static resource not found");
            response.not_found(NOT_FOUND_BODY.len())?;
            response.body(NOT_FOUND_BODY)?;
        }
        Err(err) => return Err(err),
    }
    Ok(())
}
