//! # sp-cli
//!
//! Command-line front end for a hosted identity service.
//!
//! Invocations take the form `stormpath OBJECT ACTION [OPTIONS]` and cover:
//! - Account management (list, create, update, delete, find, group-add,
//!   send-password-reset, authenticate)
//! - Group, directory and application management (list, create, delete)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod output;
pub mod service;

pub use cli::Cli;
pub use client::HttpIdentityService;
pub use config::CliConfig;
pub use dispatch::run;
pub use error::{CliError, CliResult, RemoteError};
pub use service::IdentityService;
