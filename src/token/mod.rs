//! Client and project token signing
//!
//! Both token kinds are HS256 JWTs signed with the project secret:
//! - client tokens let a participant connect to one session with one role
//! - project tokens authenticate REST calls (`X-OPENTOK-AUTH`)

mod issuer;
mod role;

pub use issuer::{ProjectClaims, TokenClaims, TokenIssuer, TokenOptions, MAX_TOKEN_LIFETIME};
pub use role::Role;
