//! # CLI Commands
//!
//! Argument types for the subcommands. Values come from flags or
//! `REVIEWD_*` environment variables.

use clap::Args;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "REVIEWD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "REVIEWD_PORT", default_value = "8080")]
    pub port: u16,

    /// Per-request deadline in seconds
    #[arg(long, env = "REVIEWD_REQUEST_TIMEOUT", default_value = "5")]
    pub request_timeout: u64,

    /// Grace period in seconds for draining in-flight requests on shutdown
    #[arg(long, env = "REVIEWD_IDLE_TIMEOUT", default_value = "30")]
    pub idle_timeout: u64,

    /// Enable debug logging
    #[arg(long, env = "REVIEWD_DEBUG")]
    pub debug: bool,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Rollback the last migration instead of applying pending ones
    #[arg(long)]
    pub rollback: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
