use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row. `email` acts as the lookup key for updates and deletes but
/// nothing enforces its uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    /// Decodes a request body. The error's `Display` text is what callers
    /// get back on a 400.
    pub fn from_json(body: &[u8]) -> Result<User, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

// Lenient decoding: keys match ignoring ASCII case, unknown keys are skipped,
// a `null` value leaves the field as it was and a bare `null` body is an
// empty user. The last occurrence of a key wins.
impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<User, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_unit<E>(self) -> Result<User, E>
    where
        E: de::Error,
    {
        Ok(User::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<User, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut user = User::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("name") {
                &mut user.name
            } else if key.eq_ignore_ascii_case("email") {
                &mut user.email
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }
        Ok(user)
    }
}
