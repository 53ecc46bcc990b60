//! # bazaar-auth
//!
//! Identity and access control for Bazaar.
//!
//! ## Modules
//!
//! - `password` - Argon2id hashing and the password strength policy
//! - `jwt` - HMAC-signed identity tokens (claims, encoder, decoder, authority)
//! - `guard` - authentication and ownership gates used by the HTTP layer
//!
//! Tokens are stateless: they cannot be revoked before they expire.

pub mod guard;
pub mod jwt;
pub mod password;

pub use guard::AccessGuard;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenAuthority};
pub use password::{PasswordHasher, PasswordValidator};
