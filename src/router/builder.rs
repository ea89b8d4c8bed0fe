use std::fmt;
use std::future::Future;

use super::Router;
use crate::convert::TypeTag;
use crate::handler::{
    async_handler, handler, try_async_handler, try_handler, FromArguments, HandlerFn,
    HandlerHandle,
};
use crate::template::{CompileError, ParameterDecl, ParameterName, RouteDefinition};

/// Parameter name list for handlers that take no arguments.
pub const NO_PARAMETERS: [&str; 0] = [];

/// Router build error
///
/// Returned by [`RouterBuilder::build`] when one or more routes fail to
/// compile. Every failure is listed; the router is not built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    failures: Vec<CompileError>,
}

impl BuildError {
    pub(crate) fn new(failures: Vec<CompileError>) -> Self {
        Self { failures }
    }

    /// The compile error of each failed route, in declaration order.
    #[must_use]
    pub fn failures(&self) -> &[CompileError] {
        &self.failures
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.failures.len() == 1 { "route" } else { "routes" };
        write!(f, "{} {} failed to compile", self.failures.len(), noun)?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

/// Name recorded for a typed handler: its path for `fn` items, the template
/// for closures.
fn handler_name<F>(template: &str) -> String {
    let name = std::any::type_name::<F>();
    if name.contains("{{closure}}") {
        template.to_string()
    } else {
        name.to_string()
    }
}

/// Builder collecting route definitions in declaration order.
///
/// Routes are compiled together by [`build`](Self::build). Declaration order
/// is significant: within one result type the first route that matches and
/// converts wins.
///
/// # Example
///
/// ```rust
/// use typeroute::router::Router;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let router = Router::builder()
///     .route("/schedule/:scheduleID", ["scheduleID"], |id: i64| id * 2)
///     .try_route("/ratio/:a/:b", ["a", "b"], |a: f64, b: f64| {
///         if b == 0.0 {
///             anyhow::bail!("division by zero");
///         }
///         Ok(a / b)
///     })
///     .async_route("/echo/:text", ["text"], |text: String| async move { text })
///     .build()?;
/// # let _ = router;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RouterBuilder {
    definitions: Vec<Result<RouteDefinition, CompileError>>,
}

impl RouterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn typed<Args, R, N>(
        mut self,
        template: &str,
        names: N,
        handler_name: &str,
        handle: HandlerHandle,
        is_async: bool,
        is_fallible: bool,
    ) -> Self
    where
        Args: FromArguments,
        R: Send + 'static,
        N: IntoIterator,
        N::Item: Into<ParameterName>,
    {
        let names: Vec<ParameterName> = names.into_iter().map(Into::into).collect();
        let kinds = Args::parameter_kinds();

        let definition = if names.len() == kinds.len() {
            Ok(RouteDefinition {
                template: template.to_string(),
                handler_name: handler_name.to_string(),
                parameters: names
                    .into_iter()
                    .zip(kinds)
                    .map(|(name, kind)| ParameterDecl::new(name, kind))
                    .collect(),
                result_type: TypeTag::of::<R>(),
                is_async,
                is_fallible,
                handler: handle,
            })
        } else {
            Err(CompileError::ParameterMismatch {
                template: template.to_string(),
                names: names.iter().map(|n| n.binding().to_string()).collect(),
                message: format!(
                    "Handler {} takes {} parameter(s) but {} name(s) were given",
                    handler_name,
                    kinds.len(),
                    names.len()
                ),
            })
        };

        self.definitions.push(definition);
        self
    }

    /// Register a synchronous handler.
    ///
    /// `names` binds each handler argument, in order, to a template parameter.
    pub fn route<F, Args, R, N>(self, template: &str, names: N, func: F) -> Self
    where
        F: HandlerFn<Args, R>,
        Args: FromArguments,
        R: Send + 'static,
        N: IntoIterator,
        N::Item: Into<ParameterName>,
    {
        let name = handler_name::<F>(template);
        self.typed::<Args, R, N>(template, names, &name, handler(func), false, false)
    }

    /// Register a synchronous handler returning `Result`.
    pub fn try_route<F, Args, R, E, N>(self, template: &str, names: N, func: F) -> Self
    where
        F: HandlerFn<Args, Result<R, E>>,
        Args: FromArguments,
        R: Send + 'static,
        E: Into<anyhow::Error> + 'static,
        N: IntoIterator,
        N::Item: Into<ParameterName>,
    {
        let name = handler_name::<F>(template);
        self.typed::<Args, R, N>(template, names, &name, try_handler(func), false, true)
    }

    /// Register an asynchronous handler.
    pub fn async_route<F, Args, Fut, R, N>(self, template: &str, names: N, func: F) -> Self
    where
        F: HandlerFn<Args, Fut>,
        Args: FromArguments,
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
        N: IntoIterator,
        N::Item: Into<ParameterName>,
    {
        let name = handler_name::<F>(template);
        self.typed::<Args, R, N>(template, names, &name, async_handler(func), true, false)
    }

    /// Register an asynchronous handler resolving to `Result`.
    pub fn try_async_route<F, Args, Fut, R, E, N>(self, template: &str, names: N, func: F) -> Self
    where
        F: HandlerFn<Args, Fut>,
        Args: FromArguments,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: Into<anyhow::Error> + 'static,
        N: IntoIterator,
        N::Item: Into<ParameterName>,
    {
        let name = handler_name::<F>(template);
        self.typed::<Args, R, N>(template, names, &name, try_async_handler(func), true, true)
    }

    /// Append a pre-built definition.
    pub fn definition(mut self, definition: RouteDefinition) -> Self {
        self.definitions.push(Ok(definition));
        self
    }

    /// Append several pre-built definitions, in order.
    pub fn definitions(mut self, definitions: impl IntoIterator<Item = RouteDefinition>) -> Self {
        self.definitions.extend(definitions.into_iter().map(Ok));
        self
    }

    /// Number of routes registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Compile every registered route and freeze the table.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] listing every route that failed to compile,
    /// including registration-time arity mismatches.
    pub fn build(self) -> Result<Router, BuildError> {
        Router::compile_all(self.definitions)
    }
}
