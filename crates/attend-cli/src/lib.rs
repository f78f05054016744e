//! Attendance CLI library.
//!
//! This crate provides the menu-driven text interface over `attend-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, SeedEmployee};
