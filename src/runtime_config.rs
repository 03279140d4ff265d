//! Environment-variable configuration for the coroutine runtime.
//!
//! Each accepted connection runs on its own coroutine; `TINYHTTPD_STACK_SIZE`
//! sets that coroutine's stack size in bytes, either decimal (`16384`) or
//! hex (`0x4000`). The default of 16 KiB is plenty for the sequential
//! read-parse-respond path a connection performs.

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for connection coroutines in bytes (default: 16 KiB)
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let stack_size = match env::var("TINYHTTPD_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(0x4000)
                } else {
                    val.parse().unwrap_or(0x4000)
                }
            }
            Err(_) => 0x4000,
        };
        RuntimeConfig { stack_size }
    }
}
