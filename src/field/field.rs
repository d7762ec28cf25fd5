use crate::prelude::*;

/// A function of the previous envelope producing a field value at dispatch
/// time. Receives `None` when the node has no predecessor.
pub type Resolver<T> =
    Arc<dyn Fn(Option<&ApiResult>) -> Result<T, BoxError> + Send + Sync + 'static>;

/// A node configuration value: either known up front or deferred until the
/// node is about to be sent.
pub enum Field<T> {
    Static(T),
    Deferred(Resolver<T>),
}

impl<T> Field<T> {
    pub fn deferred<F>(resolver: F) -> Self
    where
        F: Fn(Option<&ApiResult>) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(resolver))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T: Clone> Clone for Field<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Deferred(resolver) => Self::Deferred(resolver.clone()),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Self::Static(value.to_owned())
    }
}

impl From<Vec<(&str, &str)>> for Field<HashMap<String, String>> {
    fn from(value: Vec<(&str, &str)>) -> Self {
        Self::Static(
            value
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Field<HashMap<String, String>> {
    fn from(value: [(&str, &str); N]) -> Self {
        Self::Static(
            value
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

impl From<Vec<(&str, &str)>> for Field<Headers> {
    fn from(value: Vec<(&str, &str)>) -> Self {
        Self::Static(
            value
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Field<Headers> {
    fn from(value: [(&str, &str); N]) -> Self {
        Self::Static(
            value
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

impl From<&str> for Field<Body> {
    fn from(value: &str) -> Self {
        Self::Static(Body::from(value))
    }
}

impl From<String> for Field<Body> {
    fn from(value: String) -> Self {
        Self::Static(Body::from(value))
    }
}

impl From<Value> for Field<Body> {
    fn from(value: Value) -> Self {
        Self::Static(Body::from(value))
    }
}

impl From<Vec<u8>> for Field<Body> {
    fn from(value: Vec<u8>) -> Self {
        Self::Static(Body::from(value))
    }
}
