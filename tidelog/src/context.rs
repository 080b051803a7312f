//! Request-scoped values for context enrichment
//!
//! A [`Context`] travels with a unit of work (an HTTP request, a job) and is
//! handed to the configured fields hook by [`Logger::with_context`]. The hook
//! decides which values become log fields.
//!
//! [`Logger::with_context`]: crate::Logger::with_context

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tidelog_core::Field;

use crate::config::FieldsHook;

#[derive(Clone, Default)]
pub struct Context {
    values: Map<String, Value>,
    extensions: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.extensions.is_empty()
    }

    /// Attach a typed value, replacing any previous value of the same type.
    pub fn insert_extension<T: Any + Send + Sync>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Arc::new(value));
    }

    pub fn with_extension<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert_extension(value);
        self
    }

    pub fn extension<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Every value as a field, in insertion order.
    pub fn to_fields(&self) -> Vec<Field> {
        self.values
            .iter()
            .map(|(key, value)| Field::new(key.clone(), value.clone()))
            .collect()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// A fields hook that copies the listed keys out of the context, skipping
/// keys the context does not carry.
pub fn copy_keys<I, S>(keys: I) -> FieldsHook
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    Arc::new(move |ctx: &Context| {
        keys.iter()
            .filter_map(|key| ctx.get(key).map(|value| Field::new(key.clone(), value.clone())))
            .collect()
    })
}

/// Convenience macro for building a context
///
/// Usage:
/// ```
/// use tidelog::context;
/// let ctx = context! {
///     "request_id" => "abc123",
///     "user_id" => 42
/// };
/// assert_eq!(ctx.get("user_id"), Some(&serde_json::json!(42)));
/// ```
#[macro_export]
macro_rules! context {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut context = $crate::context::Context::new();
        $(
            context.insert($key, $value);
        )*
        context
    }};
}
