//! Cache Key Module
//!
//! Structured cache keys built from an operation name and its arguments.

use std::fmt;

// == Cache Key ==
/// Identifies one logical cache slot.
///
/// Keys compare and hash field by field, so `("q", "a,b")` can never collide
/// with two separate arguments the way a joined string could.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    args: Vec<(&'static str, String)>,
}

impl CacheKey {
    /// Starts a key for the given operation with no arguments.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            args: Vec::new(),
        }
    }

    /// Appends a named argument.
    ///
    /// Argument order is part of the key; callers build keys for the same
    /// operation in a fixed order.
    pub fn arg(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.args.push((name, value.into()));
        self
    }

    /// Approximate number of bytes the key occupies.
    pub fn approx_size(&self) -> usize {
        self.operation.len()
            + self
                .args
                .iter()
                .map(|(name, value)| name.len() + value.len())
                .sum::<usize>()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, (name, value)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", name, value)?;
        }
        write!(f, ")")
    }
}
