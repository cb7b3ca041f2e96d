//! `stockroom-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from storage and presentation:
//! role and session types, the password-hash seam, and the central access
//! policy. No IO anywhere.

pub mod credentials;
pub mod policy;
pub mod roles;
pub mod session;
pub mod user;

pub use credentials::{PasswordHash, PasswordHasher, Sha256PasswordHasher, verify_password};
pub use policy::{Action, authorize};
pub use roles::Role;
pub use session::Session;
pub use user::UserRecord;
