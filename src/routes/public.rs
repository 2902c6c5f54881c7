use super::{paths::PathKey, table::RouteTableEntry};
use crate::models::{
    Action::{Create, CreateUser, Edit, New, Update},
    Capability::{Authenticatable, Confirmable, Invitable, Recoverable, Registerable, UnlockableWithToken},
    Controller,
    HttpMethod::{Get, Patch, Post, Put},
};

/// Public Route Table
///
/// Entries reachable without a signed-in user: signing in, signing up, and the
/// token-driven recovery flows (password reset, confirmation, unlock, accepting
/// an invitation). Emitted before the protected table whenever both are built.
///
/// Order is the emission order and must stay stable.
pub static ENTRIES: &[RouteTableEntry] = &[
    // POST /sessions
    // Signs a user in. The sign-in form itself is not part of this table.
    RouteTableEntry::new(Authenticatable, Create, Post, PathKey::Sessions, "", Controller::Session),
    // GET /registrations/new, POST /registrations
    RouteTableEntry::new(Registerable, New, Get, PathKey::RegistrationsNew, "", Controller::Registration),
    RouteTableEntry::new(Registerable, Create, Post, PathKey::Registrations, "", Controller::Registration),
    // --- Password Recovery ---
    // resources "/passwords", only: new, create, edit, update
    RouteTableEntry::new(Recoverable, New, Get, PathKey::Passwords, "/new", Controller::Password),
    RouteTableEntry::new(Recoverable, Create, Post, PathKey::Passwords, "", Controller::Password),
    RouteTableEntry::new(Recoverable, Edit, Get, PathKey::Passwords, "/{id}/edit", Controller::Password),
    RouteTableEntry::new(Recoverable, Update, Put, PathKey::Passwords, "/{id}", Controller::Password),
    RouteTableEntry::new(Recoverable, Update, Patch, PathKey::Passwords, "/{id}", Controller::Password),
    // --- Confirmation ---
    // resources "/confirmations", only: new, create, edit
    RouteTableEntry::new(Confirmable, New, Get, PathKey::Confirmations, "/new", Controller::Confirmation),
    RouteTableEntry::new(Confirmable, Create, Post, PathKey::Confirmations, "", Controller::Confirmation),
    RouteTableEntry::new(Confirmable, Edit, Get, PathKey::Confirmations, "/{id}/edit", Controller::Confirmation),
    // --- Unlock ---
    // resources "/unlocks", only: new, create, edit
    RouteTableEntry::new(UnlockableWithToken, New, Get, PathKey::Unlocks, "/new", Controller::Unlock),
    RouteTableEntry::new(UnlockableWithToken, Create, Post, PathKey::Unlocks, "", Controller::Unlock),
    RouteTableEntry::new(UnlockableWithToken, Edit, Get, PathKey::Unlocks, "/{id}/edit", Controller::Unlock),
    // --- Invitation Acceptance ---
    // The invitee follows the emailed token link and then creates their account.
    RouteTableEntry::new(Invitable, Edit, Get, PathKey::Invitations, "/{id}/edit", Controller::Invitation),
    RouteTableEntry::new(Invitable, CreateUser, Post, PathKey::InvitationsCreate, "", Controller::Invitation),
];
