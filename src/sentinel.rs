//! Sentinel errors - process-wide category markers

use std::fmt;

/// A process-wide error category marker.
///
/// A sentinel names a category of failure ("build failed", "config invalid")
/// rather than a specific occurrence of it. Sentinels are compared by address
/// identity, never by message text, so two sentinels declared with the same
/// message are still distinct categories.
///
/// Declare sentinels as `static` items so every use site sees the same
/// address:
///
/// ```rust
/// use errchain::Sentinel;
///
/// static ERR_BUILD: Sentinel = Sentinel::new("build failed");
/// ```
///
/// Do not declare sentinels as `const`: a `const` is inlined at each use
/// site, giving each its own address and silently breaking identity matching.
#[derive(Debug)]
pub struct Sentinel {
    message: &'static str,
}

impl Sentinel {
    /// Create a sentinel with the given category message.
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    /// The category message.
    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Identity comparison: two sentinels are equal only if they are the same
/// `static` item.
impl PartialEq for Sentinel {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Sentinel {}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Sentinel {}
