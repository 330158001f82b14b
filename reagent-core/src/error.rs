//! Core error types
//!
//! Re-exports the unified reagent-error types so downstream code can depend
//! on `reagent_core::error` alone.

pub use reagent_error::{Error, ErrorKind, ErrorStatus, Result};
