//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EMPLOYER: &str = "employer";
pub const ROLE_CANDIDATE: &str = "candidate";

/// Roles a user may self-register with. `admin` accounts are seeded or
/// promoted manually, never registered.
pub const REGISTERABLE_ROLES: [&str; 2] = [ROLE_EMPLOYER, ROLE_CANDIDATE];
