//! Field-level input validation.

use std::borrow::Cow;
use std::fmt;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path as the client sent it, e.g. `medications[1].name`.
    pub field: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

/// All failed checks of one input, in field order.
///
/// Renders as `field: message; ` per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(
        &mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.0.push(Violation { field: field.into(), message: message.into() });
    }

    /// Adds the violations of a nested input under `prefix`.
    pub fn extend_nested(&mut self, prefix: &str, nested: Self) {
        self.0.extend(nested.0.into_iter().map(|v| Violation {
            field: Cow::Owned(format!("{prefix}.{}", v.field)),
            message: v.message,
        }));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one check failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|v| write!(f, "{}: {}; ", v.field, v.message))
    }
}

impl std::error::Error for Violations {}

/// Boundary check for inbound data.
pub trait Validate {
    /// # Errors
    ///
    /// Every failing field, not just the first one.
    fn validate(&self) -> Result<(), Violations>;
}
