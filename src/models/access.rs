//! Access levels and per-action access declarations.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Actions every model is expected to declare.
pub const KNOWN_ACTIONS: [&str; 6] = ["create", "read", "update", "remove", "search", "count"];

/// Access level required to perform an action.
///
/// Variants are declared from the most to the least restrictive, and
/// [`Access::rank`] is the position in that order. All comparisons made by the
/// explicit model builder are computed against this ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Admin,
    Owner,
    Auth,
    Guest,
}

impl Access {
    /// All levels, most restrictive first.
    pub const ORDERED: [Access; 4] = [Access::Admin, Access::Owner, Access::Auth, Access::Guest];

    /// Position of this level in [`Access::ORDERED`].
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::Admin => "admin",
            Access::Owner => "owner",
            Access::Auth => "auth",
            Access::Guest => "guest",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from action name to access level.
///
/// Serialized as a map; declaration order is preserved so the explicit
/// access list follows the order in which actions were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accesses {
    entries: Vec<(String, Access)>,
}

impl Accesses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known action set to the same level.
    #[must_use]
    pub fn uniform(access: Access) -> Self {
        let mut accesses = Self::new();
        for action in KNOWN_ACTIONS {
            accesses.set(action, access);
        }
        accesses
    }

    /// Builder-style variant of [`Accesses::set`].
    #[must_use]
    pub fn with(mut self, action: impl Into<String>, access: Access) -> Self {
        self.set(action, access);
        self
    }

    /// Set the level of an action, replacing any previous declaration in place.
    pub fn set(&mut self, action: impl Into<String>, access: Access) {
        let action = action.into();
        match self.entries.iter_mut().find(|(name, _)| *name == action) {
            Some(entry) => entry.1 = access,
            None => self.entries.push((action, access)),
        }
    }

    #[must_use]
    pub fn get(&self, action: &str) -> Option<Access> {
        self.entries.iter().find(|(name, _)| name == action).map(|(_, access)| *access)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Access)> {
        self.entries.iter().map(|(name, access)| (name.as_str(), *access))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Accesses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (action, access) in &self.entries {
            map.serialize_entry(action, access)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Accesses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AccessesVisitor;

        impl<'de> Visitor<'de> for AccessesVisitor {
            type Value = Accesses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of action names to access levels")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Accesses, M::Error> {
                let mut accesses = Accesses::new();
                while let Some((action, access)) = map.next_entry::<String, Access>()? {
                    accesses.set(action, access);
                }
                Ok(accesses)
            }
        }

        deserializer.deserialize_map(AccessesVisitor)
    }
}
