//! Authentication module for the gatekeeper server
//!
//! This module covers password strength rules, credential hashing, token
//! issuance and verification, the request gate, and the registration and
//! login flows that tie them together.

pub mod handlers;

mod gate;
mod hasher;
mod policy;
mod service;
mod token;

pub use gate::AuthGate;
pub use hasher::{CredentialHasher, DEFAULT_COST};
pub use policy::{PasswordPolicy, PolicyViolation};
pub use service::{normalize_email, AuthService};
pub use token::{AuthenticatedIdentity, Claims, TokenError, TokenService};
