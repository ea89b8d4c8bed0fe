//! # Handler Module
//!
//! Type-erased handler handles and the adapters that turn ordinary Rust
//! functions and closures into them.
//!
//! ## Overview
//!
//! The route table stores every handler behind a [`HandlerHandle`], an
//! `Arc<dyn ErasedHandler>`. At dispatch time the dispatcher hands the handler
//! an [`Invocation`] carrying the converted arguments in handler-declaration
//! order; the handler returns a boxed future resolving to its erased result.
//!
//! Typed handlers are plain functions of up to eight [`RouteParameter`]
//! arguments. Four adapters cover the combinations of synchronous or
//! asynchronous and infallible or fallible:
//!
//! | Adapter | Handler shape |
//! |---|---|
//! | [`handler`] | `Fn(A, B) -> R` |
//! | [`try_handler`] | `Fn(A, B) -> Result<R, E>` |
//! | [`async_handler`] | `Fn(A, B) -> impl Future<Output = R>` |
//! | [`try_async_handler`] | `Fn(A, B) -> impl Future<Output = Result<R, E>>` |
//!
//! Handler errors are carried as [`anyhow::Error`] and reach the caller
//! unchanged.
//!
//! [`RouteParameter`]: crate::convert::RouteParameter

mod core;

pub use core::{
    async_handler, handler, try_async_handler, try_handler, Arguments, ErasedHandler,
    FromArguments, HandlerFn, HandlerFuture, HandlerHandle, Invocation, ParamVec,
    MAX_INLINE_PARAMS,
};
