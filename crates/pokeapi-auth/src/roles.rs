//! Role hierarchy.
//!
//! Roles form a total order: `user < manager < admin`. A caller satisfies a
//! requirement when its rank is at least the required rank, so a higher role
//! implicitly passes every lower gate. Role names outside the known set rank
//! 0 and fail every gate that requires a known role.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Manager, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Rank in the default hierarchy. Always positive.
    pub fn rank(self) -> u32 {
        match self {
            Role::User => 1,
            Role::Manager => 2,
            Role::Admin => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Read-only rank table consulted by the Authorization Gate.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRanking {
    ranks: HashMap<String, u32>,
}

impl Default for RoleRanking {
    fn default() -> Self {
        Self::new(Role::ALL.map(|r| (r.as_str(), r.rank())))
    }
}

impl RoleRanking {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            ranks: entries.into_iter().map(|(n, r)| (n.into(), r)).collect(),
        }
    }

    pub fn rank(&self, role: &str) -> u32 {
        self.ranks.get(role).copied().unwrap_or(0)
    }

    pub fn satisfies(&self, caller: &str, required: Role) -> bool {
        self.rank(caller) >= self.rank(required.as_str())
    }
}
