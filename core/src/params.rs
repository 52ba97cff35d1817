//! Request parameters and the query encoder.

/// A single parameter value: one scalar or an ordered sequence of scalars.
///
/// Non-string scalars are stringified on conversion; no further guarantee is
/// made about their textual form beyond what `Display` produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single scalar value.
    One(String),
    /// An ordered sequence of scalar values, encoded as repeated pairs.
    Many(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::One(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::One(v)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    ParamValue::One(v.to_string())
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::Many(v.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for ParamValue {
    fn from(v: &[T]) -> Self {
        ParamValue::Many(v.iter().map(ToString::to_string).collect())
    }
}

/// Request parameters produced by a data-producing operation.
///
/// Keys keep their insertion order, and that order is preserved into the
/// encoded query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// True if no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameter entries (a sequence counts as one entry).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.0.iter()
    }

    /// Encode into an `application/x-www-form-urlencoded` string.
    ///
    /// Sequence values expand into one `key=value` pair per element, in
    /// element order. Reserved characters in keys and values are
    /// percent-encoded. An empty parameter set encodes to an empty string,
    /// which callers treat as "no query data".
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            match value {
                ParamValue::One(v) => {
                    serializer.append_pair(key, v);
                }
                ParamValue::Many(vs) => {
                    for v in vs {
                        serializer.append_pair(key, v);
                    }
                }
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
