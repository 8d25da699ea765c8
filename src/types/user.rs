//! User record and identifier types

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier naming a stored user
///
/// A random 128-bit value rendered in canonical hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// User record as stored and as accepted in request bodies
///
/// Decoding is lenient: `null` is an empty user, field names match
/// regardless of ASCII case, missing or `null` fields stay empty and unknown
/// fields are ignored. When a field repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl User {
    /// Create a new user record
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        biography: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            biography: biography.into(),
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<User, E> {
        Ok(User::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<User, E> {
        Ok(User::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<User, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<User, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut user = User::default();

        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("first_name") {
                &mut user.first_name
            } else if key.eq_ignore_ascii_case("last_name") {
                &mut user.last_name
            } else if key.eq_ignore_ascii_case("biography") {
                &mut user.biography
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

/// User record together with its identifier, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl UserResponse {
    /// Build a response from a stored record
    pub fn new(id: UserId, user: User) -> Self {
        Self {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            biography: user.biography,
        }
    }
}
