//! Sentiserve Core
//!
//! Shared domain types and the error taxonomy used by the trainer, the
//! predictor, and the HTTP boundary.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Label, Prediction};
