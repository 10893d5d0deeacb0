//! Callable values

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Whether a callable completes synchronously or yields a pending result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Sync,
    Async,
}

type Body = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A callable value. Two function values are equal only if they share the
/// same body.
#[derive(Clone)]
pub struct FunctionValue {
    name: Arc<str>,
    kind: FunctionKind,
    body: Arc<Body>,
}

impl FunctionValue {
    /// Wraps a synchronous function
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            kind: FunctionKind::Sync,
            body: Arc::new(body),
        }
    }

    /// Wraps an asynchronous function. Calling it yields whatever the body
    /// returns, conventionally `Value::Promise`.
    pub fn new_async<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            kind: FunctionKind::Async,
            ..Self::new(name, body)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn is_async(&self) -> bool {
        self.kind == FunctionKind::Async
    }

    /// Invokes the function
    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}
