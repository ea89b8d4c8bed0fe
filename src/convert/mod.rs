//! # Convert Module
//!
//! The convert module turns captured path substrings into typed handler
//! arguments.
//!
//! ## Overview
//!
//! Every handler parameter type implements [`RouteParameter`], a pure
//! "try parse from string" capability. Conversion failure is not an error: it
//! is a signal consumed by the dispatcher, which treats a failed *required*
//! parameter as a non-match and moves on to the next candidate route.
//!
//! Built-in implementations cover `String`, every signed and unsigned integer,
//! `f32`, `f64`, `bool` and `char`. Numeric conversions consume the entire
//! capture; `"12abc"` never parses as `12`.
//!
//! ## Optional Parameters
//!
//! `Option<T>` is itself a [`RouteParameter`] that never fails. Declaring a
//! handler argument as `Option<T>` marks it optional: a capture that does not
//! convert yields `None` for that argument instead of rejecting the route.
//!
//! ## Custom Types
//!
//! ```rust
//! use typeroute::convert::RouteParameter;
//!
//! #[derive(Debug, PartialEq)]
//! struct VenueId(i64);
//!
//! impl RouteParameter for VenueId {
//!     fn from_parameter(raw: &str) -> Option<Self> {
//!         raw.parse().ok().map(VenueId)
//!     }
//! }
//!
//! assert_eq!(VenueId::from_parameter("2"), Some(VenueId(2)));
//! assert_eq!(VenueId::from_parameter("monkey"), None);
//! ```
//!
//! ## Named Registry
//!
//! Route manifests name parameter types as text (`Int`, `String`, `f64`).
//! [`ConverterRegistry`] resolves those names to a [`ParameterKind`] so that
//! definitions loaded from a file compile to the same matchers as definitions
//! registered in code.

mod core;
#[cfg(test)]
mod tests;

pub use core::{ConverterRegistry, ParameterKind, RouteParameter, TypeTag, Value};
