use crate::{AuthorizationError, Identifier};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Identity fields of a structured request payload.
///
/// The guard reads a payload through these accessors, in the order
/// `admin_id`, `user_id`, `id`, and takes the first one that yields a value.
/// An accessor returns `Ok(None)` when the field is absent and an error when
/// the field is set to something that cannot name a caller; the error ends
/// resolution. Every accessor defaults to `Ok(None)`, so a payload type only
/// implements the fields it actually has:
///
/// ```
/// use gatekeeper::{AuthorizationError, Identifier, Payload};
///
/// struct UpdateProfile {
///     user_id: Option<u32>,
///     display_name: String,
/// }
///
/// impl Payload for UpdateProfile {
///     fn user_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
///         Ok(self.user_id.map(Identifier::from))
///     }
/// }
/// ```
pub trait Payload {
    /// Administrator acting on the request.
    fn admin_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        Ok(None)
    }

    /// User acting on the request.
    fn user_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        Ok(None)
    }

    /// Generic identifier of the caller.
    fn id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        Ok(None)
    }

    /// An empty payload is treated like an absent one and its fields are not
    /// read.
    fn is_empty(&self) -> bool {
        false
    }
}

macro_rules! forward_payload {
    ($($pointer:ty),*) => {
        $(
            impl<P: Payload + ?Sized> Payload for $pointer {
                fn admin_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
                    (**self).admin_id()
                }

                fn user_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
                    (**self).user_id()
                }

                fn id(&self) -> Result<Option<Identifier>, AuthorizationError> {
                    (**self).id()
                }

                fn is_empty(&self) -> bool {
                    (**self).is_empty()
                }
            }
        )*
    };
}

forward_payload!(&P, Box<P>, Arc<P>);

/// Read member `field` of a JSON object. `null` counts as absent; any other
/// value that is not a string or an integer is rejected.
fn member(
    map: &Map<String, Value>,
    field: &str,
) -> Result<Option<Identifier>, AuthorizationError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Identifier::from_value(value).map(Some).ok_or_else(|| {
            AuthorizationError::new(format!("Invalid identifier in payload field `{field}`"))
        }),
    }
}

/// JSON objects expose their `admin_id`, `user_id` and `id` members.
impl Payload for Map<String, Value> {
    fn admin_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        member(self, "admin_id")
    }

    fn user_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        member(self, "user_id")
    }

    fn id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        member(self, "id")
    }

    fn is_empty(&self) -> bool {
        Map::is_empty(self)
    }
}

impl Payload for Value {
    fn admin_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        self.as_object().map_or(Ok(None), Payload::admin_id)
    }

    fn user_id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        self.as_object().map_or(Ok(None), Payload::user_id)
    }

    fn id(&self) -> Result<Option<Identifier>, AuthorizationError> {
        self.as_object().map_or(Ok(None), Payload::id)
    }

    fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// Open map of named call arguments.
///
/// Arguments are forwarded untouched to the protected operation. The guard
/// only reads the `user_id` and `admin_id` keys when the payload does not
/// identify the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// An empty argument map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Arguments::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the arguments.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consume and return the underlying JSON map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
