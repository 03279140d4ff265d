use std::io;
use std::net::{SocketAddr, TcpStream as StdTcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use may::coroutine::JoinHandle;
use may::net::TcpListener;
use tracing::{error, info, warn};

use crate::runtime_config::RuntimeConfig;
use crate::server::handler::{handle_connection, ServerState};

/// One-response-per-connection HTTP server.
///
/// Binds a TCP listener and serves each accepted connection on its own
/// coroutine; connections share nothing but the [`ServerState`].
pub struct HttpServer(pub Arc<ServerState>);

/// Handle to a running server
///
/// Provides methods for waiting until the server is ready, stopping it
/// gracefully, or joining the accept loop.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// The address the listener actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to be ready to accept connections
    ///
    /// Polls the server address by attempting TCP connections until
    /// successful. Useful in tests to ensure the server is fully started
    /// before sending requests.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server doesn't become ready within ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if StdTcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop the server gracefully
    ///
    /// Cancels the accept coroutine and waits for it to finish. In-flight
    /// connections run on their own coroutines and finish their single
    /// response on their own.
    pub fn stop(self) {
        // SAFETY: cancelling the accept coroutine is the intended shutdown
        // path; the handle is owned and nothing else joins it.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the accept loop exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl HttpServer {
    pub fn new(state: Arc<ServerState>) -> Self {
        Self(state)
    }

    /// Bind `addr` and start accepting connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the port cannot be
    /// bound, or the accept coroutine cannot be spawned.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let config = RuntimeConfig::from_env();
        let listener = TcpListener::bind(addr)?;
        let addr = listener.local_addr()?;
        let state = self.0;
        // SAFETY: the accept loop owns the listener and a strong Arc to the
        // state; neither borrows from this stack frame.
        let handle = unsafe {
            may::coroutine::Builder::new()
                .name("tinyhttpd-acceptor".to_string())
                .spawn(move || accept_loop(&listener, &state, config))?
        };
        info!(addr = %addr, "listening");
        Ok(ServerHandle { addr, handle })
    }
}

fn accept_loop(listener: &TcpListener, state: &Arc<ServerState>, config: RuntimeConfig) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let state = Arc::clone(state);
                // SAFETY: the connection coroutine owns its stream and Arc;
                // it outlives nothing borrowed.
                let spawned = unsafe {
                    may::coroutine::Builder::new()
                        .stack_size(config.stack_size)
                        .spawn(move || handle_connection(stream, &state))
                };
                if let Err(err) = spawned {
                    error!(error = %err, "failed to spawn connection coroutine");
                }
            }
            Err(err) => warn!(error = %err, "accept failed"),
        }
    }
}
