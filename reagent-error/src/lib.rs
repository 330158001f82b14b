//! # reagent-error
//!
//! Unified error handling for reagent - following OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ToolNotFound, ParseFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use reagent_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ToolNotFound, "tool 'warp_drive' not registered")
//!         .with_operation("executor::execute")
//!         .with_context("tool", "warp_drive"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, reagent_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using reagent Error
pub type Result<T> = std::result::Result<T, Error>;
