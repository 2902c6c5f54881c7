use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Action, Capability};

/// ActionSet
///
/// The actions enabled for one capability: either every action or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawActionSet")]
pub enum ActionSet {
    All,
    Only(BTreeSet<Action>),
}

impl ActionSet {
    pub fn contains(&self, action: Action) -> bool {
        match self {
            ActionSet::All => true,
            ActionSet::Only(actions) => actions.contains(&action),
        }
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        ActionSet::Only(actions.into_iter().collect())
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        ActionSet::Only(actions.into_iter().collect())
    }
}

/// CapabilityRegistry
///
/// Read-only view of which capabilities are enabled and, per capability, which
/// actions. Established once from configuration at startup and consulted by the
/// route table builder for every entry it considers.
///
/// Settings accept three shapes:
/// - `"all"`: every capability with every action.
/// - `["authenticatable", "registerable"]`: the listed capabilities with every action.
/// - `{"authenticatable": "all", "registerable": ["new", "create"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRegistry")]
pub struct CapabilityRegistry {
    everything: bool,
    capabilities: BTreeMap<Capability, ActionSet>,
}

impl CapabilityRegistry {
    /// An empty registry: every query answers false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every capability and every action enabled.
    pub fn all() -> Self {
        Self {
            everything: true,
            capabilities: BTreeMap::new(),
        }
    }

    /// Enables `capability` with the given actions, replacing any earlier entry for it.
    pub fn enable(mut self, capability: Capability, actions: impl Into<ActionSet>) -> Self {
        self.capabilities.insert(capability, actions.into());
        self
    }

    /// Enables `capability` with every action.
    pub fn enable_all(self, capability: Capability) -> Self {
        self.enable(capability, ActionSet::All)
    }

    /// has_action
    ///
    /// True when `capability` is enabled and its action set includes `action`.
    /// Capabilities absent from the configuration answer false for every action.
    pub fn has_action(&self, capability: Capability, action: Action) -> bool {
        self.everything
            || self
                .capabilities
                .get(&capability)
                .is_some_and(|actions| actions.contains(action))
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.everything || self.capabilities.contains_key(&capability)
    }
}

// --- Settings Shapes ---

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Keyword {
    All,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActionSet {
    Keyword(Keyword),
    List(Vec<Action>),
}

impl From<RawActionSet> for ActionSet {
    fn from(raw: RawActionSet) -> Self {
        match raw {
            RawActionSet::Keyword(Keyword::All) => ActionSet::All,
            RawActionSet::List(actions) => ActionSet::from(actions),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRegistry {
    Keyword(Keyword),
    List(Vec<Capability>),
    Map(BTreeMap<Capability, ActionSet>),
}

impl From<RawRegistry> for CapabilityRegistry {
    fn from(raw: RawRegistry) -> Self {
        match raw {
            RawRegistry::Keyword(Keyword::All) => CapabilityRegistry::all(),
            RawRegistry::List(capabilities) => capabilities
                .into_iter()
                .fold(CapabilityRegistry::new(), CapabilityRegistry::enable_all),
            RawRegistry::Map(capabilities) => CapabilityRegistry {
                everything: false,
                capabilities,
            },
        }
    }
}
