//! Common error infrastructure for travel-core.
//!
//! Domain errors (e.g. [`CatalogError`](crate::catalog::CatalogError)) live next
//! to the code that raises them and implement [`GameError`] so callers can pick
//! a recovery strategy without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can no-op or retry with different input
/// - **Validation**: the input was malformed and must not be retried as-is
/// - **Internal**: an invariant was broken somewhere upstream
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: unknown location id selected in a stale menu.
    Recoverable,

    /// Examples: duplicate location id recorded by the discovery tracker.
    Validation,

    /// Examples: catalog index out of sync with its entries.
    Internal,

    /// Examples: the map-transition subsystem has shut down.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for classified errors across the travel crates.
///
/// Implementors derive `thiserror::Error` for `Display`/`Error` and add a
/// severity plus a stable code usable in logs and tests.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
