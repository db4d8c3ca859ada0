use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque token identifying a caller.
///
/// Callers may be identified by a number, a string, or a UUID. The guard
/// only compares identifiers and hands them to the
/// [`PermissionSource`](crate::PermissionSource); it never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric identifier, e.g. a database row id.
    Numeric(i64),
    /// UUID identifier.
    Unique(Uuid),
    /// Textual identifier, e.g. a username or an external subject id.
    Text(String),
}

impl Identifier {
    /// Read an identifier out of a JSON value. Strings become
    /// [`Identifier::Text`] and integers become [`Identifier::Numeric`].
    /// Unsigned integers beyond `i64::MAX` keep their decimal digits as
    /// [`Identifier::Text`]. Anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => match (number.as_i64(), number.as_u64()) {
                (Some(id), _) => Some(Self::Numeric(id)),
                (None, Some(id)) => Some(Self::Text(id.to_string())),
                (None, None) => None,
            },
            _ => None,
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Unique(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::Numeric(value.into())
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self::Numeric(value.into())
    }
}

impl From<Uuid> for Identifier {
    fn from(value: Uuid) -> Self {
        Self::Unique(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
