//! # Router Module
//!
//! The router module owns the compiled route table and the registration
//! surface that builds it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Collecting route definitions in declaration order
//! - Compiling every template against its handler's parameters
//! - Grouping compiled routes by the handler's result type
//! - Exposing the frozen table to the dispatcher
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: At build time, templates such as `/venue/:venueID/:style`
//!    are converted into anchored regex patterns. Any route that fails to
//!    compile fails the whole build; nothing is dropped silently.
//!
//! 2. **Dispatch**: For each path, the dispatcher walks the group for the
//!    requested result type in declaration order until one route matches and
//!    converts all of its required parameters.
//!
//! The table is immutable after [`RouterBuilder::build`]. Clones of a
//! [`Router`] share it through an `Arc`, so concurrent dispatches need no
//! locking.
//!
//! ## Example
//!
//! ```rust
//! use typeroute::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::builder()
//!     .route("/venue/:venueID/:style", ["venueID", "style"], |venue: i64, style: String| {
//!         format!("{venue}:{style}").len()
//!     })
//!     .route("/health", typeroute::NO_PARAMETERS, || ())
//!     .build()?;
//!
//! assert_eq!(router.table().len(), 2);
//! assert_eq!(router.table().result_types().len(), 2);
//! # Ok(())
//! # }
//! ```

mod builder;
mod core;
#[cfg(test)]
mod tests;

pub use builder::{BuildError, RouterBuilder, NO_PARAMETERS};
pub use core::{RouteGroup, RouteTable, Router};
