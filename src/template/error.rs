use std::fmt;

/// Route compilation error
///
/// Returned while turning a route definition into a `CompiledRoute`. A route
/// that fails to compile never reaches the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The template string cannot be split into segments and parameter tokens.
    TemplateSyntax {
        /// The offending template
        template: String,
        /// Why the template was rejected
        reason: String,
    },
    /// A template parameter has no handler parameter, or the reverse.
    ParameterMismatch {
        /// The template being compiled
        template: String,
        /// Every parameter name involved, in handler-declaration order where
        /// that applies
        names: Vec<String>,
        /// Human readable description naming the parameter(s)
        message: String,
    },
    /// A manifest named a parameter type that no converter is registered for.
    UnknownType {
        /// The template being compiled
        template: String,
        /// The unresolved type name
        name: String,
    },
}

impl CompileError {
    /// Template the error was raised for.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            CompileError::TemplateSyntax { template, .. }
            | CompileError::ParameterMismatch { template, .. }
            | CompileError::UnknownType { template, .. } => template,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::TemplateSyntax { template, reason } => {
                write!(f, "Invalid route '{}': {}", template, reason)
            }
            CompileError::ParameterMismatch {
                template, message, ..
            } => {
                write!(f, "Route '{}': {}", template, message)
            }
            CompileError::UnknownType { template, name } => {
                write!(
                    f,
                    "Route '{}': no parameter converter registered for type '{}'",
                    template, name
                )
            }
        }
    }
}

impl std::error::Error for CompileError {}
