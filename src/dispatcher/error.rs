use std::fmt;

use crate::convert::TypeTag;

/// Dispatch error
///
/// Returned by [`Router::dispatch`](crate::router::Router::dispatch) and
/// [`Router::route`](crate::router::Router::route).
#[derive(Debug)]
pub enum RouterError {
    /// No route in the selected group matched and fully converted.
    ///
    /// Recoverable by the caller, e.g. by trying another result type or
    /// reporting a 404-equivalent.
    UnmatchedPath {
        /// The path exactly as it was dispatched
        path: String,
    },
    /// The selected handler ran and failed. The handler's error is carried
    /// unchanged; use [`anyhow::Error::downcast_ref`] to inspect it.
    Handler(anyhow::Error),
    /// The selected handler could not be called with the converted arguments.
    ///
    /// Only reachable with hand-built definitions whose declared parameter
    /// types disagree with the handler.
    ArgumentMismatch {
        /// Template of the selected route
        template: String,
    },
    /// The handler's result was not of the requested type.
    ///
    /// Only reachable with hand-built definitions whose declared result type
    /// disagrees with the handler.
    ResultType {
        /// The requested result type
        expected: TypeTag,
    },
}

impl RouterError {
    /// Whether no route matched.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        matches!(self, RouterError::UnmatchedPath { .. })
    }

    /// Whether the selected handler failed.
    #[must_use]
    pub fn is_handler(&self) -> bool {
        matches!(self, RouterError::Handler(_))
    }

    /// The handler error, if this is a handler failure.
    #[must_use]
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            RouterError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnmatchedPath { path } => {
                write!(f, "No matching route for path: {}", path)
            }
            RouterError::Handler(err) => write!(f, "Handler failed: {}", err),
            RouterError::ArgumentMismatch { template } => {
                write!(
                    f,
                    "Handler for route '{}' rejected the converted arguments",
                    template
                )
            }
            RouterError::ResultType { expected } => {
                write!(f, "Handler result is not of type {}", expected)
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Handler(err) => Some(&**err),
            _ => None,
        }
    }
}
