use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::debug;

/// A converted parameter or a handler result, erased for transport through
/// the route table.
pub type Value = Box<dyn Any + Send>;

/// Identity of a Rust type used to key result groups and describe parameters.
///
/// Equality and hashing use only the [`TypeId`]; the name is kept for logs and
/// error messages.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The "no value" tag shared by side-effect-only handlers.
    #[must_use]
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by [`std::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Conversion of a captured path segment into a typed value.
///
/// Implementations must be pure: the same input always yields the same output
/// and no shared state is touched, so concurrent dispatches can convert
/// without synchronisation.
pub trait RouteParameter: Sized + Send + 'static {
    /// Convert the captured text, or return `None` when it does not represent
    /// a value of this type.
    fn from_parameter(raw: &str) -> Option<Self>;

    /// How a handler argument of this type is declared. Plain types are
    /// required; `Option<T>` overrides this to be optional over `T`.
    #[doc(hidden)]
    fn parameter_kind() -> ParameterKind {
        ParameterKind::required::<Self>()
    }

    /// Rebuild the handler argument from the value the dispatcher converted.
    #[doc(hidden)]
    fn from_argument(argument: Option<Value>) -> Option<Self> {
        argument
            .and_then(|value| value.downcast::<Self>().ok())
            .map(|boxed| *boxed)
    }
}

impl<T: RouteParameter> RouteParameter for Option<T> {
    fn from_parameter(raw: &str) -> Option<Self> {
        Some(T::from_parameter(raw))
    }

    fn parameter_kind() -> ParameterKind {
        ParameterKind::optional::<T>()
    }

    /// An absent argument is `None`; a present argument of the wrong type
    /// cannot be rebuilt.
    fn from_argument(argument: Option<Value>) -> Option<Self> {
        match argument {
            None => Some(None),
            Some(value) => T::from_argument(Some(value)).map(Some),
        }
    }
}

impl RouteParameter for String {
    fn from_parameter(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

macro_rules! parse_parameter {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RouteParameter for $ty {
                fn from_parameter(raw: &str) -> Option<Self> {
                    raw.parse::<$ty>().ok()
                }
            }
        )*
    };
}

parse_parameter!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

fn convert_erased<T: RouteParameter>(raw: &str) -> Option<Value> {
    T::from_parameter(raw).map(|value| Box::new(value) as Value)
}

/// Declared type, optionality and converter of one handler parameter.
///
/// `declared_type` is always the unwrapped type: a handler argument of type
/// `Option<u32>` has `declared_type == TypeTag::of::<u32>()` and
/// `is_optional == true`.
#[derive(Clone, Copy)]
pub struct ParameterKind {
    pub declared_type: TypeTag,
    pub is_optional: bool,
    convert: fn(&str) -> Option<Value>,
}

impl ParameterKind {
    #[must_use]
    pub fn required<T: RouteParameter>() -> Self {
        Self {
            declared_type: TypeTag::of::<T>(),
            is_optional: false,
            convert: convert_erased::<T>,
        }
    }

    #[must_use]
    pub fn optional<T: RouteParameter>() -> Self {
        Self {
            is_optional: true,
            ..Self::required::<T>()
        }
    }

    /// The same parameter type with the optionality flag replaced.
    #[must_use]
    pub fn with_optional(self, is_optional: bool) -> Self {
        Self {
            is_optional,
            ..self
        }
    }

    /// Run the declared type's conversion on a captured substring.
    #[must_use]
    pub fn convert(&self, raw: &str) -> Option<Value> {
        (self.convert)(raw)
    }
}

impl fmt::Debug for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterKind")
            .field("declared_type", &self.declared_type)
            .field("is_optional", &self.is_optional)
            .finish()
    }
}

impl PartialEq for ParameterKind {
    fn eq(&self, other: &Self) -> bool {
        self.declared_type == other.declared_type && self.is_optional == other.is_optional
    }
}

/// Runtime lookup of parameter types by the names used in route manifests.
///
/// The registry is filled once and then only read; it is `Send + Sync` and
/// can be shared between threads behind a reference.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    kinds: HashMap<String, ParameterKind>,
}

impl ConverterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every built-in conversion under both the
    /// Rust primitive name and the short names commonly used in manifests.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register::<String>("String")
            .register::<String>("string")
            .register::<String>("str")
            .register::<i64>("Int")
            .register::<i64>("int")
            .register::<u64>("UInt")
            .register::<u64>("uint")
            .register::<f64>("Double")
            .register::<f64>("double")
            .register::<f32>("Float")
            .register::<f32>("float")
            .register::<bool>("Bool")
            .register::<char>("Character")
            .register::<i8>("i8")
            .register::<i16>("i16")
            .register::<i32>("i32")
            .register::<i64>("i64")
            .register::<i128>("i128")
            .register::<isize>("isize")
            .register::<u8>("u8")
            .register::<u16>("u16")
            .register::<u32>("u32")
            .register::<u64>("u64")
            .register::<u128>("u128")
            .register::<usize>("usize")
            .register::<f32>("f32")
            .register::<f64>("f64")
            .register::<bool>("bool")
            .register::<char>("char");
        registry
    }

    /// Register `T` under `name`, replacing any earlier registration.
    pub fn register<T: RouteParameter>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self
            .kinds
            .insert(name.clone(), ParameterKind::required::<T>())
            .is_some()
        {
            debug!(type_name = %name, "Replaced parameter converter");
        }
        self
    }

    /// Resolve a type name to its (required) parameter kind.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ParameterKind> {
        self.kinds.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
