//! Core error types for the finproxy service.
//!
//! Provider failures are folded into a single "upstream fetch failed" kind
//! that remembers which operation failed. Timeouts are kept apart so callers
//! can tell a slow upstream from a failing one.

use std::fmt;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, FinanceError>;

/// The logical operation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Quotes,
    Historical,
    Details,
    Trends,
    FullInfo,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Quotes => "quotes",
            Operation::Historical => "historical data",
            Operation::Details => "asset details",
            Operation::Trends => "market trends",
            Operation::FullInfo => "full info",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type of the core crate.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// The provider call behind `operation` failed.
    #[error("Failed to fetch {operation}: {message}")]
    UpstreamFetch { operation: Operation, message: String },

    /// The provider call behind `operation` did not answer in time.
    #[error("Timed out fetching {operation} after {timeout_ms} ms")]
    Timeout { operation: Operation, timeout_ms: u64 },

    #[error("Invalid period '{0}': expected <N>d, <N>m or <N>y")]
    InvalidPeriod(String),
}

impl FinanceError {
    /// Wrap an underlying failure as an upstream fetch error for `operation`.
    pub fn upstream(operation: Operation, source: impl fmt::Display) -> Self {
        FinanceError::UpstreamFetch {
            operation,
            message: source.to_string(),
        }
    }

    /// Re-attribute a sub-operation failure to the composite `operation`.
    ///
    /// Timeouts and input errors keep their kind; upstream failures are
    /// wrapped so the message reads outermost operation first.
    pub fn within(self, operation: Operation) -> Self {
        match self {
            e @ FinanceError::UpstreamFetch { .. } => FinanceError::upstream(operation, e),
            other => other,
        }
    }

    /// Stable machine-readable code for the HTTP error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            FinanceError::UpstreamFetch { .. } => "UPSTREAM_FETCH_FAILED",
            FinanceError::Timeout { .. } => "UPSTREAM_TIMEOUT",
            FinanceError::InvalidPeriod(_) => "INVALID_PERIOD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_carries_operation() {
        let err = FinanceError::upstream(Operation::Quotes, "Symbol not found: XXXX");
        assert_eq!(err.to_string(), "Failed to fetch quotes: Symbol not found: XXXX");
        assert_eq!(err.code(), "UPSTREAM_FETCH_FAILED");
    }

    #[test]
    fn test_within_wraps_upstream_errors() {
        let err = FinanceError::upstream(Operation::Historical, "boom").within(Operation::FullInfo);
        assert_eq!(
            err.to_string(),
            "Failed to fetch full info: Failed to fetch historical data: boom"
        );
    }

    #[test]
    fn test_within_keeps_timeouts_distinct() {
        let err = FinanceError::Timeout {
            operation: Operation::Details,
            timeout_ms: 50,
        }
        .within(Operation::FullInfo);
        assert!(matches!(
            err,
            FinanceError::Timeout {
                operation: Operation::Details,
                timeout_ms: 50
            }
        ));
        assert_eq!(err.code(), "UPSTREAM_TIMEOUT");
    }
}
