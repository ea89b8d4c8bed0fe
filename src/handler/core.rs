use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use smallvec::SmallVec;

use crate::convert::{ParameterKind, RouteParameter, Value};

/// Maximum number of route parameters before heap allocation.
/// Most templates have ≤4 parameters (e.g. `/venue/:venueID/:style`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Converted handler arguments in declaration order. `None` marks an optional
/// parameter whose capture was absent or did not convert.
pub type Arguments = SmallVec<[Option<Value>; MAX_INLINE_PARAMS]>;

/// Raw captures keyed by parameter binding, in declaration order. `None`
/// marks an optional parameter that produced no value.
///
/// Names are `Arc<str>` shared with the compiled route, so building this list
/// per dispatch only copies the captured text.
pub type ParamVec = SmallVec<[(Arc<str>, Option<String>); MAX_INLINE_PARAMS]>;

/// Future returned by an erased handler.
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<Value>>;

/// Everything a handler receives for one dispatch.
#[derive(Debug)]
pub struct Invocation {
    /// Name of the handler being invoked
    pub handler_name: Arc<str>,
    /// Template of the selected route
    pub template: Arc<str>,
    /// The dispatched path
    pub path: String,
    /// Raw captures, one entry per declared parameter
    pub path_params: ParamVec,
    /// Converted arguments, one entry per declared parameter
    pub arguments: Arguments,
}

impl Invocation {
    /// Raw capture of a parameter by binding name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// A handler with its argument and result types erased.
pub trait ErasedHandler: Send + Sync + 'static {
    /// Start the handler.
    ///
    /// Returns `None` when the arguments cannot be rebuilt into the handler's
    /// parameter types; the route table guarantees this does not happen for
    /// handlers registered through the typed adapters.
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture>;
}

/// Shared, cloneable reference to an erased handler.
#[derive(Clone)]
pub struct HandlerHandle(Arc<dyn ErasedHandler>);

impl HandlerHandle {
    pub fn new(handler: impl ErasedHandler) -> Self {
        Self(Arc::new(handler))
    }

    #[inline]
    #[must_use]
    pub fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        self.0.call(invocation)
    }
}

impl fmt::Debug for HandlerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerHandle(..)")
    }
}

/// A tuple of handler argument types.
pub trait FromArguments: Sized + Send + 'static {
    /// Declared kind of each element, in order.
    fn parameter_kinds() -> Vec<ParameterKind>;

    /// Rebuild the tuple from converted arguments.
    fn from_arguments(arguments: Arguments) -> Option<Self>;
}

/// A function callable with the argument tuple `Args`.
pub trait HandlerFn<Args, Out>: Send + Sync + 'static {
    fn invoke(&self, args: Args) -> Out;
}

macro_rules! impl_handler_fn {
    ($($ty:ident),*) => {
        impl<$($ty,)*> FromArguments for ($($ty,)*)
        where
            $($ty: RouteParameter,)*
        {
            fn parameter_kinds() -> Vec<ParameterKind> {
                vec![$($ty::parameter_kind()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn from_arguments(arguments: Arguments) -> Option<Self> {
                let mut arguments = arguments.into_iter();
                $(let $ty = $ty::from_argument(arguments.next()?)?;)*
                Some(($($ty,)*))
            }
        }

        impl<Func, Out, $($ty,)*> HandlerFn<($($ty,)*), Out> for Func
        where
            Func: Fn($($ty),*) -> Out + Send + Sync + 'static,
            $($ty: RouteParameter,)*
        {
            #[allow(non_snake_case)]
            fn invoke(&self, args: ($($ty,)*)) -> Out {
                let ($($ty,)*) = args;
                (self)($($ty),*)
            }
        }
    };
}

impl_handler_fn!();
impl_handler_fn!(T1);
impl_handler_fn!(T1, T2);
impl_handler_fn!(T1, T2, T3);
impl_handler_fn!(T1, T2, T3, T4);
impl_handler_fn!(T1, T2, T3, T4, T5);
impl_handler_fn!(T1, T2, T3, T4, T5, T6);
impl_handler_fn!(T1, T2, T3, T4, T5, T6, T7);
impl_handler_fn!(T1, T2, T3, T4, T5, T6, T7, T8);

struct Infallible<F, Args, R> {
    func: F,
    _marker: PhantomData<fn(Args) -> R>,
}

impl<F, Args, R> ErasedHandler for Infallible<F, Args, R>
where
    F: HandlerFn<Args, R>,
    Args: FromArguments,
    R: Send + 'static,
{
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        let args = Args::from_arguments(invocation.arguments)?;
        let result = self.func.invoke(args);
        Some(future::ready(Ok(Box::new(result) as Value)).boxed())
    }
}

struct Fallible<F, Args, R, E> {
    func: F,
    _marker: PhantomData<fn(Args) -> Result<R, E>>,
}

impl<F, Args, R, E> ErasedHandler for Fallible<F, Args, R, E>
where
    F: HandlerFn<Args, Result<R, E>>,
    Args: FromArguments,
    R: Send + 'static,
    E: Into<anyhow::Error> + 'static,
{
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        let args = Args::from_arguments(invocation.arguments)?;
        let result = self
            .func
            .invoke(args)
            .map(|value| Box::new(value) as Value)
            .map_err(Into::into);
        Some(future::ready(result).boxed())
    }
}

struct Async<F, Args, Fut, R> {
    func: F,
    _marker: PhantomData<fn(Args) -> (Fut, R)>,
}

impl<F, Args, Fut, R> ErasedHandler for Async<F, Args, Fut, R>
where
    F: HandlerFn<Args, Fut>,
    Args: FromArguments,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        let args = Args::from_arguments(invocation.arguments)?;
        let fut = self.func.invoke(args);
        Some(async move { Ok(Box::new(fut.await) as Value) }.boxed())
    }
}

struct TryAsync<F, Args, Fut, R, E> {
    func: F,
    _marker: PhantomData<fn(Args) -> (Fut, Result<R, E>)>,
}

impl<F, Args, Fut, R, E> ErasedHandler for TryAsync<F, Args, Fut, R, E>
where
    F: HandlerFn<Args, Fut>,
    Args: FromArguments,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Into<anyhow::Error> + 'static,
{
    fn call(&self, invocation: Invocation) -> Option<HandlerFuture> {
        let args = Args::from_arguments(invocation.arguments)?;
        let fut = self.func.invoke(args);
        Some(
            async move {
                fut.await
                    .map(|value| Box::new(value) as Value)
                    .map_err(Into::into)
            }
            .boxed(),
        )
    }
}

/// Wrap a synchronous, infallible handler.
pub fn handler<F, Args, R>(func: F) -> HandlerHandle
where
    F: HandlerFn<Args, R>,
    Args: FromArguments,
    R: Send + 'static,
{
    HandlerHandle::new(Infallible {
        func,
        _marker: PhantomData,
    })
}

/// Wrap a synchronous handler returning `Result`.
pub fn try_handler<F, Args, R, E>(func: F) -> HandlerHandle
where
    F: HandlerFn<Args, Result<R, E>>,
    Args: FromArguments,
    R: Send + 'static,
    E: Into<anyhow::Error> + 'static,
{
    HandlerHandle::new(Fallible {
        func,
        _marker: PhantomData,
    })
}

/// Wrap an asynchronous, infallible handler.
pub fn async_handler<F, Args, Fut, R>(func: F) -> HandlerHandle
where
    F: HandlerFn<Args, Fut>,
    Args: FromArguments,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    HandlerHandle::new(Async {
        func,
        _marker: PhantomData,
    })
}

/// Wrap an asynchronous handler resolving to `Result`.
pub fn try_async_handler<F, Args, Fut, R, E>(func: F) -> HandlerHandle
where
    F: HandlerFn<Args, Fut>,
    Args: FromArguments,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Into<anyhow::Error> + 'static,
{
    HandlerHandle::new(TryAsync {
        func,
        _marker: PhantomData,
    })
}
