#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::{Arc, Once};

use tempfile::TempDir;
use tinyhttpd::server::{HttpServer, ServerHandle, ServerState};

/// Ensures the may runtime is configured only once per test binary.
static MAY_INIT: Once = Once::new();

pub fn setup_may_runtime() {
    MAY_INIT.call_once(|| {
        may::config().set_stack_size(0x8000);
    });
}

/// Start a server on an ephemeral port serving `webapp_root`.
///
/// Returns the handle (stop it at the end of the test), the bound address,
/// and the shared state for asserting on the user directory.
pub fn start_server(webapp_root: &Path) -> (ServerHandle, SocketAddr, Arc<ServerState>) {
    setup_may_runtime();
    let state = Arc::new(ServerState::new(webapp_root));
    let server = HttpServer::new(Arc::clone(&state))
        .start("127.0.0.1:0")
        .expect("failed to bind test server");
    server.wait_ready().expect("test server never became ready");
    let addr = server.local_addr();
    (server, addr, state)
}

/// Send raw request bytes and collect the full response.
///
/// The server writes one response and closes, so reading to end of stream
/// is the framing.
pub fn send_request(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("failed to connect to test server");
    stream.write_all(raw.as_bytes()).expect("failed to send request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .expect("failed to read response");
    response
}

/// Split a response into status line, header lines, and body.
pub fn split_response(response: &str) -> (&str, Vec<&str>, &str) {
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("response has no header terminator");
    let mut lines = head.split("\r\n");
    let status = lines.next().expect("response has no status line");
    (status, lines.collect(), body)
}

/// Build a throwaway document root with the pages the handler serves.
pub fn temp_webapp() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp document root");
    fs::create_dir(dir.path().join("user")).expect("failed to create user dir");
    fs::write(dir.path().join("index.html"), "<h1>Home</h1>\n").expect("failed to write fixture");
    fs::write(
        dir.path().join("user/login_failed.html"),
        "<h1>Login failed</h1>\n",
    )
    .expect("failed to write fixture");
    dir
}

/// A complete signup body for user `id`.
pub fn signup_body(id: &str, password: &str) -> String {
    format!("userId={id}&password={password}&name=Tester&email={id}@example.com")
}

/// A POST request with a form body and correct Content-Length.
pub fn post_request(path: &str, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

/// A bodyless GET request.
pub fn get_request(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n")
}
