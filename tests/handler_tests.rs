//! In-memory dispatch tests: drive `handle` over buffered readers and
//! inspect the exact bytes it writes, no sockets involved.

mod common;

use std::fs;
use std::io::Cursor;

use common::{get_request, post_request, signup_body, split_response, temp_webapp};
use tinyhttpd::server::{handle, ServerState};
use tinyhttpd::HttpError;

fn run(state: &ServerState, raw: &str) -> (Result<(), HttpError>, String) {
    let mut out = Vec::new();
    let result = handle(Cursor::new(raw.as_bytes().to_vec()), &mut out, state);
    (result, String::from_utf8(out).expect("response was not UTF-8"))
}

#[test]
fn test_post_signup_stores_user_and_redirects() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let body = signup_body("alice", "secret");
    let (result, response) = run(&state, &post_request("/user/create", &body));

    assert!(result.is_ok());
    assert_eq!(
        response,
        "HTTP/1.1 302 Found\r\nLocation: /index.html\r\n\r\n"
    );
    let user = state.users.find_by_id("alice").expect("user not stored");
    assert_eq!(user.password, "secret");
    assert_eq!(user.name, "Tester");
    assert_eq!(user.email, "alice@example.com");
}

#[test]
fn test_get_signup_with_query_matches_post() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let query = signup_body("bob", "hunter2");
    let (result, response) = run(&state, &get_request(&format!("/user/create?{query}")));

    assert!(result.is_ok());
    assert_eq!(
        response,
        "HTTP/1.1 302 Found\r\nLocation: /index.html\r\n\r\n"
    );
    let user = state.users.find_by_id("bob").expect("user not stored");
    assert_eq!(user.password, "hunter2");
}

#[test]
fn test_get_signup_without_query_is_bad_request() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let (result, response) = run(&state, &get_request("/user/create"));

    assert!(matches!(result, Err(HttpError::MalformedRequest { .. })));
    assert_eq!(
        response,
        "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
    assert!(state.users.is_empty());
}

#[test]
fn test_login_unknown_user_serves_failure_page() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());
    let failure_page = fs::read_to_string(webapp.path().join("user/login_failed.html")).unwrap();

    let (result, response) = run(&state, &post_request("/user/login", "userId=ghost&password=x"));

    assert!(result.is_ok());
    let (status, headers, body) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains(&format!("Content-Length: {}", failure_page.len()).as_str()));
    assert_eq!(body, failure_page);
}

#[test]
fn test_login_wrong_password_serves_failure_page() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());
    let failure_page = fs::read_to_string(webapp.path().join("user/login_failed.html")).unwrap();

    let body = signup_body("carol", "right");
    let (signup, _) = run(&state, &post_request("/user/create", &body));
    assert!(signup.is_ok());

    let (result, response) = run(&state, &post_request("/user/login", "userId=carol&password=wrong"));

    assert!(result.is_ok());
    let (status, _, body) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 200 OK");
    assert_eq!(body, failure_page);
}

#[test]
fn test_login_success_sets_cookie_and_redirects() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let body = signup_body("dave", "pw123");
    let (signup, _) = run(&state, &post_request("/user/create", &body));
    assert!(signup.is_ok());

    let (result, response) = run(&state, &post_request("/user/login", "userId=dave&password=pw123"));

    assert!(result.is_ok());
    assert_eq!(
        response,
        "HTTP/1.1 302 Found\r\nSet-Cookie: logined=true\r\nLocation: /index.html\r\n\r\n"
    );
}

#[test]
fn test_password_comparison_is_case_sensitive() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let body = signup_body("erin", "Secret");
    run(&state, &post_request("/user/create", &body)).0.unwrap();

    let (result, response) = run(&state, &post_request("/user/login", "userId=erin&password=secret"));
    assert!(result.is_ok());
    let (status, _, _) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 200 OK");
}

#[test]
fn test_static_file_served_with_exact_bytes() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());
    let index = fs::read_to_string(webapp.path().join("index.html")).unwrap();

    let (result, response) = run(&state, &get_request("/index.html"));

    assert!(result.is_ok());
    let (status, headers, body) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains(&"Content-Type: text/html;charset=utf-8"));
    assert!(headers.contains(&format!("Content-Length: {}", index.len()).as_str()));
    assert_eq!(body, index);
}

#[test]
fn test_missing_file_is_not_found() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let (result, response) = run(&state, &get_request("/missing.html"));

    assert!(result.is_ok());
    let (status, headers, body) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 404 Not Found");
    assert!(headers.contains(&format!("Content-Length: {}", body.len()).as_str()));
}

#[test]
fn test_path_traversal_is_not_found() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let (result, response) = run(&state, &get_request("/../Cargo.toml"));

    assert!(result.is_ok());
    let (status, _, _) = split_response(&response);
    assert_eq!(status, "HTTP/1.1 404 Not Found");
}

#[test]
fn test_empty_connection_produces_no_response() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let (result, response) = run(&state, "");

    assert!(result.is_ok());
    assert!(response.is_empty());
}

#[test]
fn test_malformed_request_line_is_bad_request() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let (result, response) = run(&state, "GET /index.html\r\n\r\n");

    assert!(matches!(result, Err(HttpError::MalformedRequestLine { .. })));
    assert_eq!(
        response,
        "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn test_bad_content_length_is_bad_request() {
    let webapp = temp_webapp();
    let state = ServerState::new(webapp.path());

    let raw = "POST /user/create HTTP/1.1\r\nContent-Length: ten\r\n\r\n";
    let (result, response) = run(&state, raw);

    assert!(matches!(result, Err(HttpError::MalformedHeader { .. })));
    assert_eq!(
        response,
        "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
}
