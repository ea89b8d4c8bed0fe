//! # CLI Module
//!
//! Command-line access to manifest-driven routers: compile a manifest, list
//! its route table, and resolve paths against it.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Compile every route in a manifest and list them. Exits non-zero and lists
//! every failure if any route does not compile:
//!
//! ```bash
//! typeroute check --manifest routes.yaml
//! ```
//!
//! ### `routes`
//!
//! Print the compiled table grouped by result type, in dispatch order:
//!
//! ```bash
//! typeroute routes --manifest routes.yaml
//! ```
//!
//! ### `match`
//!
//! Dispatch each path through the echo router and print what the handler
//! received as JSON. Exits non-zero if any path is unmatched:
//!
//! ```bash
//! typeroute match --manifest routes.yaml /venue/2/gold /monkey
//! ```
//!
//! `--verbose` raises the log level to `debug`, which traces every route
//! match attempt.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use typeroute::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli).await?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
