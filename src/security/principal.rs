//! Principals and the credential registry.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PrincipalConfig;

/// Coarse role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }
}

/// Read-only lookup tables from credential to principal.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct PrincipalRegistry {
    by_api_key: HashMap<String, Principal>,
    by_id: HashMap<String, Principal>,
    by_username: HashMap<String, String>,
    api_keys: HashMap<String, String>,
    /// Config order, for listings.
    order: Vec<String>,
}

impl PrincipalRegistry {
    pub fn from_config(principals: &[PrincipalConfig]) -> Self {
        let mut registry = Self::default();
        for entry in principals {
            let principal = Principal {
                id: entry.id.clone(),
                username: entry.username.clone(),
                role: entry.role,
                permissions: entry.permissions.iter().cloned().collect(),
            };
            registry
                .by_api_key
                .insert(entry.api_key.clone(), principal.clone());
            registry
                .by_username
                .insert(entry.username.clone(), entry.id.clone());
            registry
                .api_keys
                .insert(entry.id.clone(), entry.api_key.clone());
            registry.order.push(entry.id.clone());
            registry.by_id.insert(entry.id.clone(), principal);
        }
        registry
    }

    pub fn find_by_api_key(&self, api_key: &str) -> Option<&Principal> {
        self.by_api_key.get(api_key)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Principal> {
        self.by_id.get(id)
    }

    /// Credentials a user would present, for the mock login endpoint.
    pub fn credentials_for(&self, username: &str) -> Option<IssuedCredentials> {
        let id = self.by_username.get(username)?;
        let api_key = self.api_keys.get(id)?;
        Some(IssuedCredentials {
            username: username.to_string(),
            api_key: api_key.clone(),
            token: format!("{}{}", super::auth::TOKEN_PREFIX, id),
        })
    }

    /// All principals in configuration order, without credentials.
    pub fn principals(&self) -> Vec<&Principal> {
        self.order.iter().filter_map(|id| self.by_id.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// What `POST /auth/token` hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCredentials {
    pub username: String,
    pub api_key: String,
    pub token: String,
}
