//! # errchain
//!
//! Sentinel-based error chaining: wrap a category marker around a specific
//! cause without losing either one.
//!
//! ## Design Philosophy
//!
//! - **Sentinel**: a process-wide category marker ("build failed"), compared
//!   by address identity, never by message text
//! - **Chained**: the composed error, carrying both the sentinel and the
//!   underlying cause as independently matchable links
//! - **Multi-root matching**: `Chained::is` walks every link in the chain,
//!   so one error classifies under its category and its cause at once
//!
//! ## Usage
//!
//! ```rust
//! use errchain::{wrap, Sentinel};
//!
//! static ERR_BUILD: Sentinel = Sentinel::new("build failed");
//!
//! fn flush_artifacts() -> errchain::Result<()> {
//!     let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//!     Err(wrap(&ERR_BUILD, io))
//! }
//!
//! let err = flush_artifacts().unwrap_err();
//! assert_eq!(err.to_string(), "build failed: disk full");
//! assert!(err.is(&ERR_BUILD));
//! assert!(err.find_cause::<std::io::Error>().is_some());
//! ```
//!
//! ## Principles
//!
//! - Declare sentinels once, as `static` items, at module scope
//! - Wrap at error-return points; classify later with `Chained::is`
//! - Wrapping never erases the cause: both operands stay matchable

mod chained;
mod sentinel;

pub use chained::{wrap, wrapf, Chained};
pub use sentinel::Sentinel;

/// Result type alias using the chained error
pub type Result<T> = std::result::Result<T, Chained>;
