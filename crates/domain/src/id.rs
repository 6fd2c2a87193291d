//! Typed identifier newtypes.
//!
//! Keys are text. New rows get a random UUID, but any string the store
//! already holds is a valid key, and a JSON number is accepted on input and
//! kept as its decimal text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawKey> for String {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Text(text) => text,
            RawKey::Number(number) => number.to_string(),
        }
    }
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawKey::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl From<$name> for Value {
            fn from(id: $name) -> Self {
                Value::Text(id.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `t_user`.
    UserId
);

define_id!(
    /// Identifier of a row in `t_incident`.
    IncidentId
);

define_id!(
    /// Identifier of a row in `t_comment`.
    CommentId
);
