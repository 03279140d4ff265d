//! Connection handling: wire parsing, dispatch, and response writing.

pub mod handler;
pub mod http_server;
pub mod request;
pub mod response;

pub use handler::{handle, handle_connection, ServerState};
pub use http_server::{HttpServer, ServerHandle};
pub use request::{read_body, read_headers, read_request_line, Headers, RequestLine};
pub use response::ResponseWriter;
