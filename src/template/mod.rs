//! # Template Module
//!
//! The template module compiles declarative path templates into anchored
//! matchers.
//!
//! ## Template Syntax
//!
//! A template is a `/`-separated list of segments. A segment written
//! `:identifier` is a named parameter; anything else is literal text.
//! Identifiers are any run of characters other than ASCII punctuation and
//! whitespace, so non-ASCII names such as `:😀` are valid.
//!
//! ```text
//! /venue/:venueID/:style   →   ^/venue/(?P<parameter0>[^/]+)/(?P<parameter1>[^/]+)$
//! ```
//!
//! ## Capture Labels
//!
//! The regex capture group is never named after the parameter itself. Each
//! handler parameter gets a synthetic label (`parameter0`, `parameter1`, …,
//! by declaration position) so that identifiers the regex engine would reject
//! still work.
//!
//! ## Validation
//!
//! Every template parameter must be declared by the handler and every
//! handler parameter must appear in the template. Violations are reported as
//! [`CompileError::ParameterMismatch`] naming the parameter(s); malformed
//! templates are [`CompileError::TemplateSyntax`]. Errors surface before any
//! dispatch is possible.
//!
//! Literal segments are escaped, so `/v1.0/items` only matches a literal dot.

mod core;
mod error;
#[cfg(test)]
mod tests;

pub use core::{
    compile_pattern, compile_route, CompiledRoute, ParameterDecl, ParameterName, ParameterSpec,
    RouteDefinition,
};
pub use error::CompileError;
