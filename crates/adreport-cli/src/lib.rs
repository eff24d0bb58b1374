//! CLI: account listing, report generation, credential management

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;
