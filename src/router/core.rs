use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::{BuildError, RouterBuilder};
use crate::convert::TypeTag;
use crate::template::{compile_route, CompileError, CompiledRoute, RouteDefinition};

/// Compiled routes sharing one result type, in declaration order.
#[derive(Debug, Clone)]
pub struct RouteGroup {
    result_type: TypeTag,
    routes: Vec<CompiledRoute>,
}

impl RouteGroup {
    #[must_use]
    pub fn result_type(&self) -> TypeTag {
        self.result_type
    }

    #[must_use]
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Route groups keyed by result type.
///
/// Built once from a closed set of compiled routes; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    groups: HashMap<TypeTag, RouteGroup>,
    /// Result types in order of first declaration
    order: Vec<TypeTag>,
}

impl RouteTable {
    /// Group compiled routes by result type, preserving the supplied order
    /// within each group.
    pub fn build(routes: impl IntoIterator<Item = CompiledRoute>) -> Self {
        let mut groups: HashMap<TypeTag, RouteGroup> = HashMap::new();
        let mut order = Vec::new();

        for route in routes {
            let result_type = route.result_type;
            let group = groups.entry(result_type).or_insert_with(|| {
                order.push(result_type);
                RouteGroup {
                    result_type,
                    routes: Vec::new(),
                }
            });
            group.routes.push(route);
        }

        Self { groups, order }
    }

    /// The group for `result_type`, if any route returns it.
    #[inline]
    #[must_use]
    pub fn group(&self, result_type: TypeTag) -> Option<&RouteGroup> {
        self.groups.get(&result_type)
    }

    /// Result types present in the table, in order of first declaration.
    #[must_use]
    pub fn result_types(&self) -> &[TypeTag] {
        &self.order
    }

    /// Groups in order of first declaration.
    pub fn groups(&self) -> impl Iterator<Item = &RouteGroup> {
        self.order.iter().filter_map(|tag| self.groups.get(tag))
    }

    /// Every compiled route, group by group.
    pub fn routes(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.groups().flat_map(|group| group.routes.iter())
    }

    /// Total number of compiled routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(RouteGroup::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Path router owning one immutable [`RouteTable`].
///
/// Cheap to clone; clones share the table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: Arc<RouteTable>,
}

impl Router {
    /// Start registering routes.
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Compile a closed set of route definitions into a router.
    ///
    /// Every definition is compiled; if any fail, all failures are returned
    /// together and no router is built.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] listing each route that failed to compile.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = RouteDefinition>,
    ) -> Result<Self, BuildError> {
        Self::compile_all(definitions.into_iter().map(Ok))
    }

    pub(crate) fn compile_all(
        definitions: impl IntoIterator<Item = Result<RouteDefinition, CompileError>>,
    ) -> Result<Self, BuildError> {
        let mut compiled = Vec::new();
        let mut failures = Vec::new();

        for definition in definitions {
            match definition.and_then(compile_route) {
                Ok(route) => compiled.push(route),
                Err(err) => {
                    warn!(
                        template = %err.template(),
                        error = %err,
                        "Route failed to compile"
                    );
                    failures.push(err);
                }
            }
        }

        if !failures.is_empty() {
            return Err(BuildError::new(failures));
        }

        let table = RouteTable::build(compiled);

        let routes_summary: Vec<String> = table
            .routes()
            .take(10)
            .map(|route| format!("{} -> {}", route.template, route.handler_name))
            .collect();

        info!(
            routes_count = table.len(),
            groups_count = table.result_types().len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self {
            table: Arc::new(table),
        })
    }

    /// The compiled route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Every compiled route, grouped by result type, in declaration order
    /// within each group.
    pub fn routes(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.table.routes()
    }

    /// Log every compiled route at info level.
    ///
    /// Useful for verifying that routes are loaded and ordered as expected.
    pub fn dump_routes(&self) {
        info!(
            routes_count = self.table.len(),
            groups_count = self.table.result_types().len(),
            "Route table"
        );
        for group in self.table.groups() {
            for (index, route) in group.routes().iter().enumerate() {
                info!(
                    result_type = %group.result_type(),
                    index = index,
                    template = %route.template,
                    handler_name = %route.handler_name,
                    pattern = %route.matcher.as_str(),
                    is_async = route.is_async,
                    is_fallible = route.is_fallible,
                    "Route"
                );
            }
        }
    }
}
