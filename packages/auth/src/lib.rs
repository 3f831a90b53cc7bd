//! Authentication collaborators for the token demos.
//!
//! - [`password`]: salted Argon2id hashing, deliberately non-deterministic
//! - [`users`]: an in-memory user directory built on it
//! - [`sessions`]: a cookie-session store with expiry and eviction
//!
//! None of these are needed to issue or verify signed tokens.

mod error;
pub mod password;
pub mod sessions;
pub mod users;

pub use error::{AuthError, AuthResult};
pub use sessions::{Session, SessionStore};
pub use users::{User, UserStore};
