//! Per-action access descriptors.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Access, Accesses, KNOWN_ACTIONS};

/// One declared action with its level compared against every level.
///
/// `gte_x` is `rank(level) >= rank(x)` and `lte_x` is `rank(level) <= rank(x)`
/// in the order `admin, owner, auth, guest`: `gte_owner` holds for `owner`,
/// `auth` and `guest`, `lte_owner` holds for `admin` and `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionAccess {
    pub action: String,
    pub level: Access,
    pub admin: bool,
    pub owner: bool,
    pub auth: bool,
    pub guest: bool,
    pub gte_admin: bool,
    pub gte_owner: bool,
    pub gte_auth: bool,
    pub gte_guest: bool,
    pub lte_admin: bool,
    pub lte_owner: bool,
    pub lte_auth: bool,
    pub lte_guest: bool,
}

impl ActionAccess {
    pub fn new(action: impl Into<String>, level: Access) -> Self {
        let rank = level.rank();
        let gte = |other: Access| rank >= other.rank();
        let lte = |other: Access| rank <= other.rank();

        Self {
            action: action.into(),
            level,
            admin: level == Access::Admin,
            owner: level == Access::Owner,
            auth: level == Access::Auth,
            guest: level == Access::Guest,
            gte_admin: gte(Access::Admin),
            gte_owner: gte(Access::Owner),
            gte_auth: gte(Access::Auth),
            gte_guest: gte(Access::Guest),
            lte_admin: lte(Access::Admin),
            lte_owner: lte(Access::Owner),
            lte_auth: lte(Access::Auth),
            lte_guest: lte(Access::Guest),
        }
    }
}

/// Set-level flags over all declared actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessProperties {
    pub only_admin: bool,
    pub only_owner: bool,
    pub only_auth: bool,
    pub only_guest: bool,
    pub max_admin: bool,
    pub max_owner: bool,
    pub max_auth: bool,
    pub max_guest: bool,
    pub no_admin: bool,
    pub no_owner: bool,
    pub no_auth: bool,
    pub no_guest: bool,
    pub has_admin: bool,
    pub has_owner: bool,
    pub has_auth: bool,
    pub has_guest: bool,
}

impl AccessProperties {
    fn from_list(list: &[ActionAccess]) -> Self {
        let mut counts = [0usize; Access::ORDERED.len()];
        for access in list {
            counts[access.level.rank()] += 1;
        }
        let count = |level: Access| counts[level.rank()];
        let only = |level: Access| count(level) == list.len();
        // The most permissive level present: `level` is used and nothing looser is
        let max = |level: Access| {
            count(level) > 0 && counts[level.rank() + 1..].iter().all(|&c| c == 0)
        };

        Self {
            only_admin: only(Access::Admin),
            only_owner: only(Access::Owner),
            only_auth: only(Access::Auth),
            only_guest: only(Access::Guest),
            max_admin: max(Access::Admin),
            max_owner: max(Access::Owner),
            max_auth: max(Access::Auth),
            max_guest: max(Access::Guest),
            no_admin: count(Access::Admin) == 0,
            no_owner: count(Access::Owner) == 0,
            no_auth: count(Access::Auth) == 0,
            no_guest: count(Access::Guest) == 0,
            has_admin: count(Access::Admin) > 0,
            has_owner: count(Access::Owner) > 0,
            has_auth: count(Access::Auth) > 0,
            has_guest: count(Access::Guest) > 0,
        }
    }
}

/// Access descriptors of a model, grouped by level and indexable by action.
#[derive(Debug, Clone)]
pub struct ExplicitAccesses {
    list: Vec<ActionAccess>,
    properties: AccessProperties,
}

impl ExplicitAccesses {
    pub(super) fn new(accesses: &Accesses) -> Self {
        let list: Vec<ActionAccess> =
            accesses.iter().map(|(action, level)| ActionAccess::new(action, level)).collect();
        let properties = AccessProperties::from_list(&list);
        Self {
            list,
            properties,
        }
    }

    /// Descriptors in declaration order.
    #[must_use]
    pub fn list(&self) -> &[ActionAccess] {
        &self.list
    }

    #[must_use]
    pub fn properties(&self) -> &AccessProperties {
        &self.properties
    }

    /// Actions declared at exactly `level`.
    #[must_use]
    pub fn at_level(&self, level: Access) -> Vec<&ActionAccess> {
        self.list.iter().filter(|access| access.level == level).collect()
    }

    #[must_use]
    pub fn action(&self, action: &str) -> Option<&ActionAccess> {
        self.list.iter().find(|access| access.action == action)
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&ActionAccess>
    where
        P: Fn(&ActionAccess) -> bool,
    {
        self.list.iter().filter(|access| predicate(access)).collect()
    }
}

impl Serialize for ExplicitAccesses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("list", &self.list)?;
        map.serialize_entry("properties", &self.properties)?;
        for level in Access::ORDERED {
            map.serialize_entry(level.as_str(), &self.at_level(level))?;
        }
        for action in KNOWN_ACTIONS {
            map.serialize_entry(action, &self.action(action))?;
        }
        map.end()
    }
}
