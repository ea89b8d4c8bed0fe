//! Dispatcher core module - hot path for path dispatch.
//!
//! Matching and conversion run synchronously against the immutable table;
//! only the handler invocation is awaited.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::RouterError;
use crate::convert::{TypeTag, Value};
use crate::handler::{Arguments, Invocation, ParamVec};
use crate::router::{RouteGroup, Router};
use crate::template::CompiledRoute;

/// Result of resolving a path without invoking the handler.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The selected route
    pub route: CompiledRoute,
    /// Position of the route within its result-type group
    pub index: usize,
    /// Raw captures by parameter binding; `None` for optional parameters
    /// that produced no value
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a raw capture by parameter binding name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// A route selected by the scan, with its converted arguments.
struct Selection<'a> {
    route: &'a CompiledRoute,
    index: usize,
    arguments: Arguments,
    path_params: ParamVec,
}

/// Try one route against `path`.
///
/// Returns `None` when the pattern does not match or a required parameter is
/// missing or fails to convert.
fn try_route(route: &CompiledRoute, path: &str) -> Option<(Arguments, ParamVec)> {
    let captures = route.matcher.captures(path)?;

    let mut arguments = Arguments::with_capacity(route.parameters.len());
    let mut path_params = ParamVec::with_capacity(route.parameters.len());

    for parameter in &route.parameters {
        let raw = captures
            .name(&parameter.capture_label)
            .map(|m| m.as_str());
        let value = raw.and_then(|raw| parameter.convert(raw));

        if value.is_none() && !parameter.is_optional {
            debug!(
                template = %route.template,
                parameter = %parameter.binding,
                declared_type = %parameter.declared_type,
                raw = ?raw,
                "Required parameter failed conversion"
            );
            return None;
        }

        let kept = if value.is_some() {
            raw.map(str::to_string)
        } else {
            None
        };
        path_params.push((Arc::clone(&parameter.binding), kept));
        arguments.push(value);
    }

    Some((arguments, path_params))
}

/// Walk `group` in declaration order; the first route that matches and
/// converts every required parameter wins.
fn select<'a>(group: &'a RouteGroup, path: &str) -> Option<Selection<'a>> {
    for (index, route) in group.routes().iter().enumerate() {
        debug!(
            path = %path,
            template = %route.template,
            index = index,
            "Route match attempt"
        );
        if let Some((arguments, path_params)) = try_route(route, path) {
            return Some(Selection {
                route,
                index,
                arguments,
                path_params,
            });
        }
    }
    None
}

impl Router {
    fn select(&self, result_type: TypeTag, path: &str) -> Option<Selection<'_>> {
        let Some(group) = self.table().group(result_type) else {
            debug!(
                path = %path,
                result_type = %result_type,
                "No routes for result type"
            );
            return None;
        };
        select(group, path)
    }

    /// Resolve `path` within the `result_type` group without invoking the
    /// handler.
    ///
    /// Applies the same matching and conversion rules as
    /// [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn match_route(&self, result_type: TypeTag, path: &str) -> Option<RouteMatch> {
        self.select(result_type, path).map(|selection| RouteMatch {
            route: selection.route.clone(),
            index: selection.index,
            path_params: selection.path_params,
        })
    }

    /// Dispatch `path` to the first matching route returning `result_type`.
    ///
    /// # Errors
    ///
    /// * [`RouterError::UnmatchedPath`] if no route in the group matched and
    ///   converted (including when the group does not exist)
    /// * [`RouterError::Handler`] if the selected handler failed
    /// * [`RouterError::ArgumentMismatch`] if the handler rejected the
    ///   converted arguments
    pub async fn dispatch(&self, result_type: TypeTag, path: &str) -> Result<Value, RouterError> {
        let match_start = Instant::now();

        let Some(selection) = self.select(result_type, path) else {
            warn!(
                path = %path,
                result_type = %result_type,
                duration_us = match_start.elapsed().as_micros() as u64,
                "No route matched"
            );
            return Err(RouterError::UnmatchedPath {
                path: path.to_string(),
            });
        };

        let route = selection.route;
        info!(
            path = %path,
            result_type = %result_type,
            template = %route.template,
            handler_name = %route.handler_name,
            index = selection.index,
            path_params = ?selection.path_params,
            duration_us = match_start.elapsed().as_micros() as u64,
            "Route matched"
        );

        let invocation = Invocation {
            handler_name: Arc::clone(&route.handler_name),
            template: Arc::clone(&route.template),
            path: path.to_string(),
            path_params: selection.path_params,
            arguments: selection.arguments,
        };

        let Some(future) = route.handler.call(invocation) else {
            warn!(
                template = %route.template,
                handler_name = %route.handler_name,
                "Handler rejected converted arguments"
            );
            return Err(RouterError::ArgumentMismatch {
                template: route.template.to_string(),
            });
        };

        let handler_name = Arc::clone(&route.handler_name);
        let start = Instant::now();
        match future.await {
            Ok(value) => {
                debug!(
                    handler_name = %handler_name,
                    latency_us = start.elapsed().as_micros() as u64,
                    "Handler completed"
                );
                Ok(value)
            }
            Err(err) => {
                warn!(
                    handler_name = %handler_name,
                    latency_us = start.elapsed().as_micros() as u64,
                    error = %err,
                    "Handler failed"
                );
                Err(RouterError::Handler(err))
            }
        }
    }

    /// Dispatch `path` to the first matching route whose handler returns `R`.
    ///
    /// Use `route::<()>` for side-effect-only handlers.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch). Additionally returns
    /// [`RouterError::ResultType`] if a hand-built definition declared `R` but
    /// its handler produced something else.
    pub async fn route<R: Send + 'static>(&self, path: &str) -> Result<R, RouterError> {
        let expected = TypeTag::of::<R>();
        let value = self.dispatch(expected, path).await?;
        value
            .downcast::<R>()
            .map(|boxed| *boxed)
            .map_err(|_| RouterError::ResultType { expected })
    }
}
