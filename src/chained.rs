//! The composed error type and its constructors

use crate::Sentinel;
use std::error::Error as StdError;
use std::fmt;
use std::ptr;

/// An error chaining a category sentinel with an underlying cause.
///
/// A `Chained` value holds two independent parent links: the sentinel that
/// classifies the failure and the error that describes it. Both remain
/// matchable after composition, so calling code can ask "is this a build
/// failure?" without losing access to "because the disk was full".
///
/// # Example
///
/// ```rust
/// use errchain::{wrap, Sentinel};
///
/// static ERR_BUILD: Sentinel = Sentinel::new("build failed");
/// static ERR_DEPLOY: Sentinel = Sentinel::new("deploy failed");
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let err = wrap(&ERR_BUILD, io);
///
/// assert_eq!(err.to_string(), "build failed: disk full");
/// assert!(err.is(&ERR_BUILD));
/// assert!(!err.is(&ERR_DEPLOY));
/// ```
pub struct Chained {
    sentinel: &'static Sentinel,
    detail: Option<String>,
    cause: anyhow::Error,
}

/// Wrap an underlying error with a sentinel, creating an error chain.
///
/// The result renders as `"<sentinel>: <err>"` and matches both operands:
/// `is(sentinel)` holds, and `err` stays reachable through the cause chain.
/// The sentinel comes first by convention, followed by the specific failure.
pub fn wrap(sentinel: &'static Sentinel, err: impl Into<anyhow::Error>) -> Chained {
    Chained {
        sentinel,
        detail: None,
        cause: err.into(),
    }
}

/// Wrap an underlying error with a sentinel and a formatted detail message.
///
/// This is a convenience for the common pattern of adding call-site context
/// between the category and the cause:
///
/// ```rust
/// use errchain::{wrapf, Sentinel};
///
/// static ERR_BUILD: Sentinel = Sentinel::new("build failed");
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "exit status 1");
/// let err = wrapf(&ERR_BUILD, format!("stage {}", "compile"), io);
///
/// assert_eq!(err.to_string(), "build failed: stage compile: exit status 1");
/// assert!(err.is(&ERR_BUILD));
/// ```
///
/// The cause is a separate argument rather than a formatting placeholder so
/// it participates in the chain as a value instead of collapsing into text.
pub fn wrapf(
    sentinel: &'static Sentinel,
    detail: impl Into<String>,
    err: impl Into<anyhow::Error>,
) -> Chained {
    Chained {
        sentinel,
        detail: Some(detail.into()),
        cause: err.into(),
    }
}

impl Chained {
    /// The sentinel this error was wrapped with.
    pub fn sentinel(&self) -> &'static Sentinel {
        self.sentinel
    }

    /// The formatted detail message, if constructed with [`wrapf`].
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Check whether this chain contains the given sentinel.
    ///
    /// Walks every parent link depth-first: the sentinel of this error, the
    /// sentinels of any nested `Chained` causes, and sentinels used directly
    /// as causes. Matching is by address identity.
    pub fn is(&self, sentinel: &'static Sentinel) -> bool {
        if ptr::eq(self.sentinel, sentinel) {
            return true;
        }
        self.cause.chain().any(|link| {
            if let Some(nested) = link.downcast_ref::<Chained>() {
                return ptr::eq(nested.sentinel, sentinel);
            }
            if let Some(nested) = link.downcast_ref::<&'static Sentinel>() {
                return ptr::eq(*nested, sentinel);
            }
            false
        })
    }

    /// Find the first cause of concrete type `E` anywhere in the chain.
    pub fn find_cause<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.cause.chain().find_map(|link| link.downcast_ref::<E>())
    }

    /// Iterate over the underlying cause chain, outermost first.
    ///
    /// The iterator does not include the sentinel link; use [`Chained::is`]
    /// or [`Chained::sentinel`] for category matching.
    pub fn chain(&self) -> anyhow::Chain<'_> {
        self.cause.chain()
    }

    /// The innermost cause in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.cause.root_cause()
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Chained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sentinel)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }

        write!(f, ": {}", self.cause)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Chained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f)?;
        writeln!(f, "    Sentinel: {}", self.sentinel)?;

        if let Some(detail) = &self.detail {
            writeln!(f, "    Detail: {}", detail)?;
        }

        writeln!(f, "    Causes:")?;
        for link in self.cause.chain() {
            writeln!(f, "        {}", link)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl StdError for Chained {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref() as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ERR_BUILD: Sentinel = Sentinel::new("build failed");
    static ERR_CONFIG: Sentinel = Sentinel::new("config invalid");
    static ERR_OTHER: Sentinel = Sentinel::new("unrelated");

    fn disk_full() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, "disk full")
    }

    #[test]
    fn test_wrap_renders_both() {
        let err = wrap(&ERR_BUILD, disk_full());
        assert_eq!(err.to_string(), "build failed: disk full");
    }

    #[test]
    fn test_wrap_matches_sentinel() {
        let err = wrap(&ERR_BUILD, disk_full());
        assert!(err.is(&ERR_BUILD));
        assert!(!err.is(&ERR_OTHER));
    }

    #[test]
    fn test_wrap_matches_cause() {
        let err = wrap(&ERR_BUILD, disk_full());
        let cause = err.find_cause::<std::io::Error>();
        assert_eq!(cause.map(|e| e.to_string()), Some("disk full".to_string()));
    }

    #[test]
    fn test_wrapf_renders_and_matches() {
        let err = wrapf(&ERR_BUILD, format!("stage {}", "compile"), disk_full());
        assert_eq!(err.to_string(), "build failed: stage compile: disk full");
        assert_eq!(err.detail(), Some("stage compile"));
        assert!(err.is(&ERR_BUILD));
        assert!(err.find_cause::<std::io::Error>().is_some());
    }

    #[test]
    fn test_nested_wrap_matches_every_link() {
        let err = wrap(&ERR_BUILD, wrap(&ERR_CONFIG, disk_full()));

        assert_eq!(err.to_string(), "build failed: config invalid: disk full");
        assert!(err.is(&ERR_BUILD));
        assert!(err.is(&ERR_CONFIG));
        assert!(!err.is(&ERR_OTHER));
        assert!(err.find_cause::<std::io::Error>().is_some());
    }

    #[test]
    fn test_sentinel_as_cause() {
        let err = wrap(&ERR_BUILD, &ERR_CONFIG);
        assert_eq!(err.to_string(), "build failed: config invalid");
        assert!(err.is(&ERR_BUILD));
        assert!(err.is(&ERR_CONFIG));
    }

    #[test]
    fn test_render_is_idempotent() {
        let err = wrapf(&ERR_BUILD, "stage link", disk_full());
        assert_eq!(err.to_string(), err.to_string());
    }

    #[test]
    fn test_std_source_traverses_nesting() {
        let err = wrap(&ERR_BUILD, wrap(&ERR_CONFIG, disk_full()));

        let inner = StdError::source(&err).expect("outer has a source");
        assert_eq!(inner.to_string(), "config invalid: disk full");

        let innermost = inner.source().expect("inner has a source");
        assert_eq!(innermost.to_string(), "disk full");
    }

    #[test]
    fn test_root_cause() {
        let err = wrap(&ERR_BUILD, wrap(&ERR_CONFIG, disk_full()));
        assert_eq!(err.root_cause().to_string(), "disk full");
    }

    #[test]
    fn test_chain_iterates_causes_only() {
        let err = wrapf(&ERR_CONFIG, "loading profile", disk_full());
        let rendered: Vec<String> = err.chain().map(|link| link.to_string()).collect();
        assert_eq!(rendered, vec!["disk full".to_string()]);
    }

    #[test]
    fn test_sentinel_accessor() {
        let err = wrap(&ERR_BUILD, disk_full());
        assert_eq!(*err.sentinel(), ERR_BUILD);
        assert!(err.detail().is_none());
    }
}
