use futures::future::{self, FutureExt};
use serde::Serialize;

use crate::convert::Value;
use crate::handler::{ErasedHandler, HandlerFuture, HandlerHandle, Invocation};

/// What the echo handler saw for one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoResponse {
    pub handler: String,
    pub template: String,
    pub path: String,
    pub params: Vec<EchoParam>,
}

/// One argument as captured from the path; `null` when an optional
/// parameter produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoParam {
    pub name: String,
    pub value: Option<String>,
}

// Example handler: echoes back the route and its arguments
struct EchoHandler;

impl ErasedHandler for EchoHandler {
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        let response = EchoResponse {
            handler: invocation.handler_name.to_string(),
            template: invocation.template.to_string(),
            path: invocation.path,
            params: invocation
                .path_params
                .into_iter()
                .map(|(name, value)| EchoParam {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        };
        Some(future::ready(Ok(Box::new(response) as Value)).boxed())
    }
}

/// Handler that answers every route with an [`EchoResponse`].
///
/// Accepts any argument list, so it can stand in for handlers declared in a
/// manifest.
#[must_use]
pub fn echo_handler() -> HandlerHandle {
    HandlerHandle::new(EchoHandler)
}
