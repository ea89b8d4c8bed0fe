//! # typeroute
//!
//! **typeroute** is a typed path router: it maps URL-style paths such as
//! `/venue/2/gold` onto strongly-typed handler functions, converting each
//! captured path segment into the handler's declared parameter type.
//!
//! ## Overview
//!
//! Routes are declared with a template and a handler:
//!
//! ```text
//! /venue/:venueID/:style   ->   |venue: i64, style: String| -> Venue
//! ```
//!
//! At build time every template is checked against its handler: each
//! `:parameter` must bind to exactly one handler argument and every handler
//! argument must appear in the template. At dispatch time the router selects
//! the routes whose handler returns the requested type, tries them in
//! declaration order, converts the captures, and calls the first route whose
//! required parameters all convert.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`convert`]** - Parameter conversion (`RouteParameter`) and the named
//!   converter registry
//! - **[`template`]** - Template parsing and compilation into anchored matchers
//! - **[`handler`]** - Type-erased handlers and the typed adapters
//! - **[`router`]** - Route registration and the immutable route table
//! - **[`dispatcher`]** - Path resolution and handler invocation
//! - **[`manifest`]** - Route definitions loaded from YAML/JSON
//! - **[`cli`]** - The `typeroute` command-line tool
//! - **[`logging`]** - `tracing-subscriber` setup for binaries and tests
//!
//! ### Dispatch Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Table as RouteTable
//!     participant Route as CompiledRoute
//!     participant Handler
//!
//!     Caller->>Router: route::<Venue>("/venue/2/gold")
//!     Router->>Table: group(TypeTag::of::<Venue>())
//!     Table-->>Router: routes in declaration order
//!     loop each route until one converts
//!         Router->>Route: matcher.captures(path)
//!         Route-->>Router: captures or no match
//!         Router->>Route: convert required / optional parameters
//!     end
//!     alt a route matched and converted
//!         Router->>Handler: call(arguments)
//!         Handler-->>Caller: Ok(Venue)
//!     else nothing matched
//!         Router-->>Caller: Err(UnmatchedPath)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use typeroute::{Router, RouterError};
//!
//! #[derive(Debug, PartialEq)]
//! struct Venue {
//!     id: i64,
//!     style: String,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::builder()
//!     .route("/venue/:venueID/:style", ["venueID", "style"], |id: i64, style: String| {
//!         Venue { id, style }
//!     })
//!     .build()?;
//!
//! let venue: Venue = router.route("/venue/2/gold").await?;
//! assert_eq!(venue, Venue { id: 2, style: "gold".to_string() });
//!
//! let err = router.route::<Venue>("/monkey").await.unwrap_err();
//! assert!(matches!(err, RouterError::UnmatchedPath { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Manifests
//!
//! Routes can also be declared as data and compiled at runtime. Parameter
//! types are named and resolved through a [`ConverterRegistry`]; every route
//! is answered by the echo handler:
//!
//! ```bash
//! typeroute check --manifest demos/routes.yaml
//! typeroute match --manifest demos/routes.yaml /venue/2/gold
//! ```
//!
//! ## Logging
//!
//! Every routing decision is logged through `tracing`. Binaries install a
//! subscriber with [`logging::init_logging`]; set `TYPEROUTE_LOG_LEVEL=debug`
//! to see each route match attempt.

pub mod cli;
pub mod convert;
pub mod dispatcher;
pub mod echo;
pub mod handler;
pub mod logging;
pub mod manifest;
pub mod router;
pub mod template;

pub use convert::{ConverterRegistry, ParameterKind, RouteParameter, TypeTag, Value};
pub use dispatcher::{RouteMatch, RouterError};
pub use echo::EchoResponse;
pub use handler::HandlerHandle;
pub use manifest::Manifest;
pub use router::{BuildError, RouteTable, Router, RouterBuilder, NO_PARAMETERS};
pub use template::{CompileError, CompiledRoute, ParameterName, RouteDefinition};
