//! Authentication, authorization and throttling extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::Viewer`] -- Possibly-anonymous reader; never rejects.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`rate_limit::LoginThrottle`] -- Counts a login attempt against the client's window.

pub mod auth;
pub mod rbac;
pub mod rate_limit;
