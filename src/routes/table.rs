use crate::models::{Action, Capability, Controller, Handler, HttpMethod};

use super::{paths::PathKey, protected, public};

/// RouteGroup
///
/// The partition an entry belongs to. Public entries are reachable anonymously
/// (sign in, sign up, recovery flows); protected entries assume a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    Public,
    Protected,
}

/// RouteTableEntry
///
/// One row of the fixed declarative route table. The path is `path_key`
/// resolved against the merged `RoutePaths`, followed by `suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTableEntry {
    pub capability: Capability,
    pub action: Action,
    pub method: HttpMethod,
    pub path_key: PathKey,
    pub suffix: &'static str,
    pub handler: Handler,
}

impl RouteTableEntry {
    pub(crate) const fn new(
        capability: Capability,
        action: Action,
        method: HttpMethod,
        path_key: PathKey,
        suffix: &'static str,
        controller: Controller,
    ) -> Self {
        Self {
            capability,
            action,
            method,
            path_key,
            suffix,
            handler: Handler::new(controller, action),
        }
    }
}

/// Entries of `group` in emission order.
pub fn entries(group: RouteGroup) -> &'static [RouteTableEntry] {
    match group {
        RouteGroup::Public => public::ENTRIES,
        RouteGroup::Protected => protected::ENTRIES,
    }
}
