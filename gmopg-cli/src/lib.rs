//! Command-line client for the GMO Payment Gateway.
//!
//! Wraps [`gmopg`] and [`gmopg_http`] for operators: call any operation from
//! the shell, inspect the request a call would send, or decode a raw
//! gateway response with localized error messages.
//!
//! # Modules
//!
//! - [`cli`] — `clap` argument definitions
//! - [`config`] — TOML configuration with environment variable expansion
//! - [`commands`] — Subcommand implementations

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Args, CallArgs, Command};
pub use config::CliConfig;
