use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
};

use super::table::{self, RouteGroup};
use crate::{error::ConfigError, models::HttpMethod};

/// PathKey
///
/// Symbolic name of a URL template. Every key can be overridden independently,
/// both in the settings file (`default_routes`) and per build call (`custom_routes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKey {
    Sessions,
    Registrations,
    RegistrationsNew,
    RegistrationsEdit,
    Passwords,
    Confirmations,
    Unlocks,
    Invitations,
    InvitationsCreate,
    InvitationsResend,
}

impl PathKey {
    pub const ALL: [PathKey; 10] = [
        PathKey::Sessions,
        PathKey::Registrations,
        PathKey::RegistrationsNew,
        PathKey::RegistrationsEdit,
        PathKey::Passwords,
        PathKey::Confirmations,
        PathKey::Unlocks,
        PathKey::Invitations,
        PathKey::InvitationsCreate,
        PathKey::InvitationsResend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PathKey::Sessions => "sessions",
            PathKey::Registrations => "registrations",
            PathKey::RegistrationsNew => "registrations_new",
            PathKey::RegistrationsEdit => "registrations_edit",
            PathKey::Passwords => "passwords",
            PathKey::Confirmations => "confirmations",
            PathKey::Unlocks => "unlocks",
            PathKey::Invitations => "invitations",
            PathKey::InvitationsCreate => "invitations_create",
            PathKey::InvitationsResend => "invitations_resend",
        }
    }

    /// Built-in template for this key.
    pub fn default_path(self) -> &'static str {
        match self {
            PathKey::Sessions => "/sessions",
            PathKey::Registrations => "/registrations",
            PathKey::RegistrationsNew => "/registrations/new",
            PathKey::RegistrationsEdit => "/registrations/edit",
            PathKey::Passwords => "/passwords",
            PathKey::Confirmations => "/confirmations",
            PathKey::Unlocks => "/unlocks",
            PathKey::Invitations => "/invitations",
            PathKey::InvitationsCreate => "/invitations/create",
            PathKey::InvitationsResend => "/invitations/{id}/resend",
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathKey {
    type Err = UnknownPathKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownPathKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route path key {0:?}")]
pub struct UnknownPathKey(pub String);

/// RoutePaths
///
/// Path templates keyed by `PathKey`. `RoutePaths::default()` holds the built-in
/// templates; overrides are merged over it key by key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePaths {
    overrides: BTreeMap<PathKey, String>,
}

impl RoutePaths {
    /// Returns a copy of `self` with `overrides` layered on top. Keys absent from
    /// `overrides` keep their current template.
    pub fn merged(&self, overrides: &BTreeMap<PathKey, String>) -> Self {
        let mut merged = self.clone();
        merged
            .overrides
            .extend(overrides.iter().map(|(key, path)| (*key, path.clone())));
        merged
    }

    pub fn with(mut self, key: PathKey, path: impl Into<String>) -> Self {
        self.overrides.insert(key, path.into());
        self
    }

    pub fn get(&self, key: PathKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_path())
    }

    /// resolve
    ///
    /// Concrete path for `key` with a member `suffix` (`""`, `/new`, `/{id}/edit`)
    /// appended. A trailing slash on the template is dropped before joining.
    pub fn resolve(&self, key: PathKey, suffix: &str) -> String {
        let base = self.get(key);
        if suffix.is_empty() {
            return base.to_string();
        }
        format!("{}{}", base.trim_end_matches('/'), suffix)
    }

    fn is_overridden(&self, key: PathKey) -> bool {
        self.overrides.contains_key(&key)
    }

    /// validate
    ///
    /// Checks that the table can be mounted with these paths: every template starts
    /// with `/`, and no two table entries resolve to the same method and path.
    /// Every entry is considered, enabled or not, so a later change to the
    /// capabilities cannot turn a valid settings file into a startup panic.
    ///
    /// # Errors
    /// `ConfigError::InvalidRoute` naming the offending key and its resolved path.
    /// For a collision the reported key is the overridden one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in PathKey::ALL {
            let path = self.get(key);
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidRoute {
                    key,
                    path: path.to_string(),
                });
            }
        }

        let mut claimed: HashMap<(HttpMethod, String), PathKey> = HashMap::new();
        let entries = [RouteGroup::Public, RouteGroup::Protected]
            .into_iter()
            .flat_map(table::entries);
        for entry in entries {
            let path = self.resolve(entry.path_key, entry.suffix);
            match claimed.get(&(entry.method, path.clone())) {
                Some(&earlier) => {
                    let key = if self.is_overridden(entry.path_key) {
                        entry.path_key
                    } else {
                        earlier
                    };
                    return Err(ConfigError::InvalidRoute { key, path });
                }
                None => {
                    claimed.insert((entry.method, path), entry.path_key);
                }
            }
        }
        Ok(())
    }
}
