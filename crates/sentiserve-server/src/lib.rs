//! Sentiserve Server
//!
//! Thin HTTP boundary over [`sentiserve_model`]: request validation,
//! error-to-status mapping, and the `train`/`predict`/`serve` CLI.

pub mod cli;
pub mod server;
