//! # Manifest Module
//!
//! Route definitions as plain data, loaded from a YAML or JSON file.
//!
//! A manifest names each parameter's type by string; the names are resolved
//! through a [`ConverterRegistry`]. Every manifest route is bound to the echo
//! handler, so a manifest router always dispatches with result type
//! [`EchoResponse`].
//!
//! ```yaml
//! routes:
//!   - path: /venue/:venueID/:style
//!     handler: venue
//!     parameters:
//!       - { name: venueID, type: Int }
//!       - { name: style, type: String }
//!       - { name: page, type: Int, optional: true }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::convert::{ConverterRegistry, TypeTag};
use crate::echo::{echo_handler, EchoResponse};
use crate::router::{BuildError, Router};
use crate::template::{CompileError, ParameterDecl, ParameterName, RouteDefinition};

/// A route manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Routes in declaration order
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,
}

/// One manifest route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRoute {
    /// Route template, e.g. `/venue/:venueID`
    pub path: String,
    /// Handler name recorded on the compiled route
    pub handler: String,
    /// Handler parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ManifestParameter>,
}

/// One handler parameter of a manifest route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestParameter {
    pub name: String,
    /// Converter name, looked up in the [`ConverterRegistry`]
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub unlabeled: bool,
}

impl Manifest {
    /// Load a manifest from a `.yaml`/`.yml` or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let manifest = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

        debug!(
            manifest = %path.display(),
            routes_count = manifest.routes.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }

    /// Parse a YAML manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid manifest.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid manifest.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve every route into a definition bound to the echo handler.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] listing every route naming an unknown type.
    pub fn definitions(
        &self,
        registry: &ConverterRegistry,
    ) -> Result<Vec<RouteDefinition>, BuildError> {
        let mut definitions = Vec::with_capacity(self.routes.len());
        let mut failures = Vec::new();
        for route in &self.routes {
            match route.definition(registry) {
                Ok(definition) => definitions.push(definition),
                Err(err) => failures.push(err),
            }
        }
        if failures.is_empty() {
            Ok(definitions)
        } else {
            Err(BuildError::new(failures))
        }
    }

    /// Compile the manifest into an echo router.
    ///
    /// Unknown types and template errors are reported together, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any route fails to resolve or compile.
    pub fn router(&self, registry: &ConverterRegistry) -> Result<Router, BuildError> {
        Router::compile_all(self.routes.iter().map(|route| route.definition(registry)))
    }
}

impl ManifestRoute {
    /// Resolve parameter types and bind the echo handler.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownType`] for the first parameter whose
    /// type has no registered converter.
    pub fn definition(&self, registry: &ConverterRegistry) -> Result<RouteDefinition, CompileError> {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| {
                let Some(kind) = registry.get(&parameter.type_name) else {
                    warn!(
                        template = %self.path,
                        parameter = %parameter.name,
                        type_name = %parameter.type_name,
                        known_types = ?registry.names(),
                        "Unknown parameter type"
                    );
                    return Err(CompileError::UnknownType {
                        template: self.path.clone(),
                        name: parameter.type_name.clone(),
                    });
                };
                let name = if parameter.unlabeled {
                    ParameterName::unlabeled(parameter.name.as_str())
                } else {
                    ParameterName::from(parameter.name.as_str())
                };
                Ok(ParameterDecl::new(name, kind.with_optional(parameter.optional)))
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        Ok(RouteDefinition {
            template: self.path.clone(),
            handler_name: self.handler.clone(),
            parameters,
            result_type: TypeTag::of::<EchoResponse>(),
            is_async: false,
            is_fallible: false,
            handler: echo_handler(),
        })
    }
}
