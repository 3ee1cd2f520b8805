// Error types for storefront-e2e

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the suite
#[derive(Debug, Error)]
pub enum Error {
    /// The environment file for the selected `TEST_ENV` does not exist
    ///
    /// Every run needs `.env.<TEST_ENV>` next to the workspace root.
    /// Create it (see `.env.dev`) or select another environment.
    #[error("Environment file not found: {} (TEST_ENV={env})", path.display())]
    EnvFileNotFound { env: String, path: PathBuf },

    /// A configuration value could not be interpreted
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// A page's locator table is inconsistent or holds a malformed selector
    #[error("Invalid locator {page}.{key}: {reason}")]
    InvalidLocator {
        page: &'static str,
        key: String,
        reason: String,
    },

    /// Error reported by the Playwright driver
    #[error(transparent)]
    Driver(#[from] playwright_rs::Error),

    /// Explicit wait did not reach the expected element state in time
    ///
    /// Unlike visibility checks, explicit waits assert an expected state and
    /// surface their failure to the calling test.
    #[error("Timed out after {timeout:?} waiting for '{selector}' to be {state}")]
    WaitTimeout {
        selector: String,
        state: &'static str,
        timeout: Duration,
    },

    /// An element-scoped action found nothing to act on
    #[error("No element matches '{selector}' to {action}")]
    ElementNotFound {
        selector: String,
        action: &'static str,
    },

    /// Waited for a navigation that never happened
    #[error("Timed out after {timeout:?} waiting for navigation away from '{from}'")]
    NavigationTimeout { from: String, timeout: Duration },

    /// A scenario expectation did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A whole test attempt exceeded the configured per-test timeout
    #[error("Test timed out after {0:?}")]
    TestTimeout(Duration),

    /// URL could not be parsed or joined onto the base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Whether this error came from a failed expectation rather than the
    /// driver or the environment.
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::Assertion(_) => true,
            Error::Context(_, inner) => inner.is_assertion(),
            _ => false,
        }
    }
}

/// Fails the current scenario with [`Error::Assertion`] unless `cond` holds.
///
/// ```ignore
/// verify!(titles.len() > 0, "expected results for '{}'", term);
/// ```
#[macro_export]
macro_rules! verify {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::Error::Assertion(format!($($arg)+)));
        }
    };
}

/// Fails the current scenario unless both values are equal.
#[macro_export]
macro_rules! verify_eq {
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                if left != right {
                    return Err($crate::Error::Assertion(format!(
                        "{}: expected {:?}, got {:?}",
                        format!($($arg)+),
                        right,
                        left
                    )));
                }
            }
        }
    };
}
