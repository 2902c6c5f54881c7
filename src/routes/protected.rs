use super::{paths::PathKey, table::RouteTableEntry};
use crate::models::{
    Action::{Create, Delete, Edit, New, Resend, Show, Update},
    Capability::{Authenticatable, Invitable, Registerable},
    Controller,
    HttpMethod::{Get, Patch, Post, Put},
    HttpMethod,
};

/// Protected Route Table
///
/// Entries that assume a signed-in user: sending invitations, signing out, and
/// managing the user's own registration. The host application is expected to
/// guard these with its authentication layer when mounting them.
pub static ENTRIES: &[RouteTableEntry] = &[
    // --- Invitations ---
    // resources "/invitations", only: new, create
    RouteTableEntry::new(Invitable, New, Get, PathKey::Invitations, "/new", Controller::Invitation),
    RouteTableEntry::new(Invitable, Create, Post, PathKey::Invitations, "", Controller::Invitation),
    // GET /invitations/{id}/resend
    RouteTableEntry::new(Invitable, Resend, Get, PathKey::InvitationsResend, "", Controller::Invitation),
    // DELETE /sessions
    // Signs the current user out.
    RouteTableEntry::new(Authenticatable, Delete, HttpMethod::Delete, PathKey::Sessions, "", Controller::Session),
    // --- Registration Management ---
    RouteTableEntry::new(Registerable, Show, Get, PathKey::Registrations, "", Controller::Registration),
    RouteTableEntry::new(Registerable, Update, Put, PathKey::Registrations, "", Controller::Registration),
    RouteTableEntry::new(Registerable, Update, Patch, PathKey::Registrations, "", Controller::Registration),
    RouteTableEntry::new(Registerable, Edit, Get, PathKey::RegistrationsEdit, "", Controller::Registration),
    RouteTableEntry::new(Registerable, Delete, HttpMethod::Delete, PathKey::Registrations, "", Controller::Registration),
];
