//! # tinyhttpd
//!
//! A tiny HTTP/1.1 server that parses the wire format by hand: one TCP
//! connection in, a strict request-line/header parse, dispatch to a handful
//! of hardcoded behaviors, one raw response out.
//!
//! ## Architecture
//!
//! - **[`server::request`]** - request-line and header parsing, body reads
//! - **[`server::response`]** - status-line/header/body writing primitives
//! - **[`server::handler`]** - the per-connection dispatch state machine
//! - **[`server::http_server`]** - listener, accept loop, server handle
//! - **[`query_string`]** - `key=value&...` codec (no percent-decoding)
//! - **[`users`]** - the shared signup/login user directory
//! - **[`static_files`]** - document-root file serving
//! - **[`runtime_config`]** - coroutine stack sizing from the environment
//!
//! ## Behavior
//!
//! Exactly four routes, checked in order: `POST /user/create` (form-body
//! signup), `/user/create?...` (query-string signup), `/user/login`
//! (form-body login, success sets `logined=true`), and everything else as a
//! static file under the document root. One response per connection, no
//! keep-alive.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tinyhttpd::server::{HttpServer, ServerState};
//!
//! let state = Arc::new(ServerState::new("webapp"));
//! let server = HttpServer::new(state).start("0.0.0.0:8080").expect("bind failed");
//! server.join().expect("server exited abnormally");
//! ```
//!
//! ## Runtime considerations
//!
//! tinyhttpd runs on the `may` coroutine runtime, not tokio: each accepted
//! connection gets its own coroutine whose stack size comes from
//! `TINYHTTPD_STACK_SIZE`. Blocking reads block only that connection's
//! coroutine. There are no timeouts; a client that stalls mid-headers parks
//! its coroutine until it disconnects.

pub mod cli;
pub mod error;
pub mod query_string;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod users;

pub use error::HttpError;
pub use query_string::parse_query_string;
pub use server::{HttpServer, ServerHandle, ServerState};
pub use static_files::StaticFiles;
pub use users::{User, UserDirectory};
