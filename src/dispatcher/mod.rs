//! # Dispatcher Module
//!
//! The dispatcher resolves a runtime path against the route group for a
//! requested result type and invokes the selected handler.
//!
//! ## Overview
//!
//! Dispatch is a linear, first-match-wins scan of one [`RouteGroup`]:
//!
//! 1. Match the whole path against the route's anchored matcher. No match:
//!    try the next route.
//! 2. Convert every **required** parameter. A missing capture or a failed
//!    conversion is treated exactly like a pattern mismatch: try the next
//!    route.
//! 3. Convert every **optional** parameter. A failure yields `None` for that
//!    argument only.
//! 4. Invoke the handler with the converted arguments in declaration order
//!    and return its result.
//!
//! If nothing matches, the caller receives [`RouterError::UnmatchedPath`]
//! carrying the original path. A handler that runs and fails surfaces as
//! [`RouterError::Handler`], so "nothing matched" and "something matched but
//! failed" stay distinguishable.
//!
//! ## Result Types
//!
//! Routes are grouped by the handler's result type, so one call selects one
//! group:
//!
//! ```rust
//! use typeroute::router::Router;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::builder()
//!     .route("/venue/:venueID/:style", ["venueID", "style"], |venue: i64, _style: String| venue)
//!     .route("/schedule/:scheduleID", ["scheduleID"], |_id: i64| ())
//!     .build()?;
//!
//! let venue: i64 = router.route("/venue/2/gold").await?;
//! assert_eq!(venue, 2);
//!
//! router.route::<()>("/schedule/1").await?;
//!
//! // `/schedule/1` has no `i64` route
//! assert!(router.route::<i64>("/schedule/1").await.unwrap_err().is_unmatched());
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Dispatch only reads the table. Per-call state (captures, converted values)
//! lives on the dispatching task. The dispatcher never times out, retries, or
//! caches a handler; cancellation and failure are those of the handler.
//!
//! [`RouteGroup`]: crate::router::RouteGroup

mod core;
mod error;

pub use core::RouteMatch;
pub use error::RouterError;
