//! Time report CLI library.
//!
//! This crate provides the CLI interface and the file/stdin plumbing around
//! the `tr-core` engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
