use std::path::PathBuf;

use clap::Parser;

/// Command-line options for the `tinyhttpd` binary.
#[derive(Parser, Debug)]
#[command(name = "tinyhttpd")]
#[command(about = "Tiny hand-rolled HTTP/1.1 server: signup, login, static files", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "TINYHTTPD_ADDR")]
    pub addr: String,

    /// Document root for static resources
    #[arg(short, long, default_value = "webapp", env = "TINYHTTPD_WEBAPP_ROOT")]
    pub webapp_root: PathBuf,

    /// Enable debug logging (request lines, headers)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
