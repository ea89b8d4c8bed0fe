use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::CompileError;
use crate::convert::{ParameterKind, TypeTag, Value};
use crate::handler::HandlerHandle;

/// A whole segment of the form `:identifier`.
static PARAMETER_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"^:([^!"#$%&'()*+,\-./:;<=>?@\[\\\]^`{|}~\s]+)$"##)
        .expect("parameter segment regex should be valid")
});

/// Matches exactly one non-empty path segment.
const PARAMETER_CAPTURE: &str = "[^/]+";

/// Surface name of a handler parameter.
///
/// `binding` is the name the template refers to (`:binding`). A labeled
/// parameter also exposes that name to callers; an unlabeled one only binds
/// it internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterName {
    Labeled(String),
    Unlabeled(String),
}

impl ParameterName {
    #[must_use]
    pub fn unlabeled(binding: impl Into<String>) -> Self {
        ParameterName::Unlabeled(binding.into())
    }

    /// The name templates use to reference this parameter.
    #[must_use]
    pub fn binding(&self) -> &str {
        match self {
            ParameterName::Labeled(name) | ParameterName::Unlabeled(name) => name,
        }
    }

    /// The external label, absent for unlabeled parameters.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            ParameterName::Labeled(name) => Some(name),
            ParameterName::Unlabeled(_) => None,
        }
    }
}

impl From<&str> for ParameterName {
    fn from(name: &str) -> Self {
        ParameterName::Labeled(name.to_string())
    }
}

impl From<String> for ParameterName {
    fn from(name: String) -> Self {
        ParameterName::Labeled(name)
    }
}

impl From<&String> for ParameterName {
    fn from(name: &String) -> Self {
        ParameterName::Labeled(name.clone())
    }
}

/// One handler parameter as declared by the registration layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: ParameterName,
    pub kind: ParameterKind,
}

impl ParameterDecl {
    #[must_use]
    pub fn new(name: impl Into<ParameterName>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A compiled handler parameter.
///
/// `capture_label` names the regex capture group and is unique within its
/// route.
#[derive(Clone)]
pub struct ParameterSpec {
    /// External label; `None` for unlabeled parameters
    pub name: Option<String>,
    /// Name the template refers to this parameter by
    pub binding: Arc<str>,
    /// Unwrapped declared type
    pub declared_type: TypeTag,
    /// Whether a failed conversion yields an absent value instead of a non-match
    pub is_optional: bool,
    /// Synthetic capture group name, e.g. `parameter0`
    pub capture_label: String,
    kind: ParameterKind,
}

impl ParameterSpec {
    fn new(index: usize, decl: &ParameterDecl) -> Self {
        Self {
            name: decl.name.label().map(str::to_string),
            binding: Arc::from(decl.name.binding()),
            declared_type: decl.kind.declared_type,
            is_optional: decl.kind.is_optional,
            capture_label: format!("parameter{index}"),
            kind: decl.kind,
        }
    }

    /// Convert a captured substring to this parameter's declared type.
    #[inline]
    #[must_use]
    pub fn convert(&self, raw: &str) -> Option<Value> {
        self.kind.convert(raw)
    }
}

impl fmt::Debug for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("name", &self.name)
            .field("binding", &self.binding)
            .field("declared_type", &self.declared_type)
            .field("is_optional", &self.is_optional)
            .field("capture_label", &self.capture_label)
            .finish()
    }
}

/// A route definition as plain data, ready for compilation.
///
/// Produced by [`RouterBuilder`](crate::router::RouterBuilder) for handlers
/// registered in code, or by [`Manifest`](crate::manifest::Manifest) for
/// routes declared in a file.
#[derive(Clone)]
pub struct RouteDefinition {
    pub template: String,
    pub handler_name: String,
    pub parameters: Vec<ParameterDecl>,
    pub result_type: TypeTag,
    pub is_async: bool,
    pub is_fallible: bool,
    pub handler: HandlerHandle,
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("template", &self.template)
            .field("handler_name", &self.handler_name)
            .field("parameters", &self.parameters)
            .field("result_type", &self.result_type)
            .field("is_async", &self.is_async)
            .field("is_fallible", &self.is_fallible)
            .finish_non_exhaustive()
    }
}

/// A route after compilation. Immutable once constructed.
///
/// The matcher's named capture groups are exactly the `capture_label`s of
/// `parameters`, which are kept in handler-declaration order.
#[derive(Clone)]
pub struct CompiledRoute {
    pub template: Arc<str>,
    pub handler_name: Arc<str>,
    pub matcher: Regex,
    pub parameters: Vec<ParameterSpec>,
    pub result_type: TypeTag,
    pub is_async: bool,
    pub is_fallible: bool,
    pub handler: HandlerHandle,
}

impl CompiledRoute {
    /// Whether `path` matches the anchored matcher, ignoring conversion.
    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("template", &self.template)
            .field("handler_name", &self.handler_name)
            .field("matcher", &self.matcher.as_str())
            .field("parameters", &self.parameters)
            .field("result_type", &self.result_type)
            .field("is_async", &self.is_async)
            .field("is_fallible", &self.is_fallible)
            .finish_non_exhaustive()
    }
}

fn check_syntax(template: &str) -> Result<(), CompileError> {
    let reason = if template.is_empty() {
        Some("template is empty")
    } else if !template.starts_with('/') {
        Some("template must start with '/'")
    } else if template.contains('?') {
        Some("templates match paths only; remove the query component")
    } else if template.contains('#') {
        Some("templates match paths only; remove the fragment component")
    } else if template
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        Some("template contains whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CompileError::TemplateSyntax {
            template: template.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn mismatch(template: &str, names: Vec<String>, message: String) -> CompileError {
    CompileError::ParameterMismatch {
        template: template.to_string(),
        names,
        message,
    }
}

/// Compile a template against the handler's declared parameters.
///
/// Returns the anchored matcher and one [`ParameterSpec`] per declared
/// parameter, in declaration order.
///
/// # Errors
///
/// * [`CompileError::TemplateSyntax`] for malformed templates
/// * [`CompileError::ParameterMismatch`] when a template parameter is not
///   declared by the handler, a declared parameter is absent from the
///   template, a template uses a parameter twice, or the handler declares two
///   parameters with the same binding
///
/// # Example
///
/// ```rust
/// use typeroute::convert::RouteParameter;
/// use typeroute::template::{compile_pattern, ParameterDecl};
///
/// let params = [
///     ParameterDecl::new("venueID", i64::parameter_kind()),
///     ParameterDecl::new("style", String::parameter_kind()),
/// ];
/// let (matcher, specs) = compile_pattern("/venue/:venueID/:style", &params, "test").unwrap();
/// assert!(matcher.is_match("/venue/2/gold"));
/// assert!(!matcher.is_match("/venue/2/gold/extra"));
/// assert_eq!(specs[1].capture_label, "parameter1");
/// ```
pub fn compile_pattern(
    template: &str,
    parameters: &[ParameterDecl],
    handler_name: &str,
) -> Result<(Regex, Vec<ParameterSpec>), CompileError> {
    check_syntax(template)?;

    let mut pending: HashMap<&str, usize> = HashMap::with_capacity(parameters.len());
    for (index, decl) in parameters.iter().enumerate() {
        let binding = decl.name.binding();
        if pending.insert(binding, index).is_some() {
            return Err(mismatch(
                template,
                vec![binding.to_string()],
                format!("Handler {handler_name} declares parameter more than once: {binding}"),
            ));
        }
    }

    let specs: Vec<ParameterSpec> = parameters
        .iter()
        .enumerate()
        .map(|(index, decl)| ParameterSpec::new(index, decl))
        .collect();

    let mut pattern = String::with_capacity(template.len() * 2 + 2);
    pattern.push('^');

    let mut segment_count = 0usize;
    for segment in template.split('/').filter(|s| !s.is_empty()) {
        segment_count += 1;
        pattern.push('/');

        let Some(captures) = PARAMETER_SEGMENT.captures(segment) else {
            pattern.push_str(&regex::escape(segment));
            continue;
        };
        let name = captures.get(1).map_or("", |m| m.as_str());

        let Some(index) = pending.remove(name) else {
            let message = if specs.iter().any(|s| s.binding.as_ref() == name) {
                format!("Handler {handler_name} parameter used more than once in route: {name}")
            } else {
                format!("Handler {handler_name} does not define parameter: {name}")
            };
            return Err(mismatch(template, vec![name.to_string()], message));
        };

        pattern.push_str("(?P<");
        pattern.push_str(&specs[index].capture_label);
        pattern.push('>');
        pattern.push_str(PARAMETER_CAPTURE);
        pattern.push(')');
    }

    if !pending.is_empty() {
        let mut unconsumed: Vec<(usize, &str)> =
            pending.into_iter().map(|(name, index)| (index, name)).collect();
        unconsumed.sort_unstable();
        let names: Vec<String> = unconsumed
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect();
        let prefix = if names.len() > 1 {
            "Route missing parameters found in handler"
        } else {
            "Route missing parameter found in handler"
        };
        let message = format!("{prefix}: {}", names.join(", "));
        return Err(mismatch(template, names, message));
    }

    if segment_count == 0 {
        pattern.push('/');
    }
    pattern.push('$');

    let matcher = Regex::new(&pattern).map_err(|err| CompileError::TemplateSyntax {
        template: template.to_string(),
        reason: err.to_string(),
    })?;

    debug!(
        template = %template,
        pattern = %matcher.as_str(),
        parameters = specs.len(),
        "Compiled route template"
    );

    Ok((matcher, specs))
}

/// Compile a full route definition.
///
/// # Errors
///
/// See [`compile_pattern`].
pub fn compile_route(definition: RouteDefinition) -> Result<CompiledRoute, CompileError> {
    let (matcher, parameters) = compile_pattern(
        &definition.template,
        &definition.parameters,
        &definition.handler_name,
    )?;

    Ok(CompiledRoute {
        template: Arc::from(definition.template),
        handler_name: Arc::from(definition.handler_name),
        matcher,
        parameters,
        result_type: definition.result_type,
        is_async: definition.is_async,
        is_fallible: definition.is_fallible,
        handler: definition.handler,
    })
}
