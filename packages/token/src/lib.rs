//! Compact HMAC-SHA256 signed bearer tokens.
//!
//! A token is `header.claims.signature`, each segment unpadded base64url:
//!
//! - header: `{"alg":"HS256","typ":"JWT"}`
//! - claims: `{"username":<string>,"iat":<int>,"exp":<int>}`
//! - signature: HMAC-SHA256 over `header.claims` with the service key
//!
//! ```
//! use authlab_token::{SigningKey, TokenService};
//!
//! # fn main() -> Result<(), authlab_token::TokenError> {
//! let service = TokenService::new(SigningKey::new("an example key of thirty-two bytes")?);
//! let token = service.issue("taro", 1_700_000_000, 3600)?;
//! let claims = service.verify(token.as_str(), 1_700_003_600)?;
//! assert_eq!(claims.subject, "taro");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
mod error;
mod key;
pub mod service;
pub mod signer;
mod types;

pub use config::TokenConfig;
pub use error::*;
pub use key::{RECOMMENDED_KEY_LEN, SigningKey};
pub use service::TokenService;
pub use types::*;
