use axum::routing::MethodFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Capability & Action Vocabulary ---

/// Capability
///
/// A named authentication feature area that can be switched on or off in the
/// configuration. Each capability owns a set of actions, and every action may or
/// may not have a route in the generated table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Capability {
    Authenticatable,
    Registerable,
    Recoverable,
    Confirmable,
    UnlockableWithToken,
    Invitable,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 6] = [
        Capability::Authenticatable,
        Capability::Registerable,
        Capability::Recoverable,
        Capability::Confirmable,
        Capability::UnlockableWithToken,
        Capability::Invitable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Authenticatable => "authenticatable",
            Capability::Registerable => "registerable",
            Capability::Recoverable => "recoverable",
            Capability::Confirmable => "confirmable",
            Capability::UnlockableWithToken => "unlockable_with_token",
            Capability::Invitable => "invitable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action
///
/// An operation within a capability (e.g. `create`, `edit`). Action names are
/// shared across capabilities; the pair (capability, action) is what the
/// registry answers for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
    New,
    Create,
    Edit,
    Update,
    Delete,
    Show,
    Resend,
    CreateUser,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::New,
        Action::Create,
        Action::Edit,
        Action::Update,
        Action::Delete,
        Action::Show,
        Action::Resend,
        Action::CreateUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::New => "new",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Show => "show",
            Action::Resend => "resend",
            Action::CreateUser => "create_user",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- HTTP Surface ---

/// HttpMethod
///
/// The verbs the route table uses. Converted to an axum `MethodFilter` when the
/// table is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller
///
/// The external controller that owns a group of handlers. Controller bodies live
/// in the host application; the table only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Controller {
    Session,
    Registration,
    Password,
    Confirmation,
    Unlock,
    Invitation,
}

impl Controller {
    pub fn as_str(self) -> &'static str {
        match self {
            Controller::Session => "session",
            Controller::Registration => "registration",
            Controller::Password => "password",
            Controller::Confirmation => "confirmation",
            Controller::Unlock => "unlock",
            Controller::Invitation => "invitation",
        }
    }
}

/// Handler
///
/// Identifies the controller action that serves a route. Rendered as
/// `controller#action` (e.g. `session#create`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Handler {
    pub controller: Controller,
    pub action: Action,
}

impl Handler {
    pub const fn new(controller: Controller, action: Action) -> Self {
        Self { controller, action }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller.as_str(), self.action)
    }
}

// --- Builder Output ---

/// ResolvedRoute
///
/// One emitted route: the concrete path, the verb, and the handler it maps to,
/// tagged with the (capability, action) pair that enabled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ResolvedRoute {
    pub method: HttpMethod,
    pub path: String,
    pub handler: Handler,
    pub capability: Capability,
    pub action: Action,
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.path, self.handler)
    }
}

/// RouteTableResponse
///
/// Response body of `GET /coherence/routes`: both halves of the mounted table in
/// emission order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteTableResponse {
    pub public: Vec<ResolvedRoute>,
    pub protected: Vec<ResolvedRoute>,
}

/// PlaceholderResponse
///
/// Body returned by the placeholder handlers until the host application wires
/// real controllers in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PlaceholderResponse {
    /// `controller#action` of the route that matched.
    pub handler: String,
    pub capability: Capability,
    pub action: Action,
}

impl From<&ResolvedRoute> for PlaceholderResponse {
    fn from(route: &ResolvedRoute) -> Self {
        Self {
            handler: route.handler.to_string(),
            capability: route.capability,
            action: route.action,
        }
    }
}
