//! Token issuance and verification.
//!
//! [`TokenService`] joins the codec and the signer. Verification treats the
//! signature as a hard gate: no segment is decoded until the tag over the
//! first two segments has been checked.

use crate::codec::{base64_url_decode, base64_url_encode, decode_segment, encode_segment};
use crate::config::TokenConfig;
use crate::error::{TokenError, TokenResult};
use crate::key::SigningKey;
use crate::signer;
use crate::types::{Claims, Header, Token, TokenState};
use chrono::Utc;

/// Issues and verifies HS256 tokens with a single process-wide key.
///
/// Holds nothing mutable; share it as `Arc<TokenService>` across threads.
#[derive(Debug, Clone)]
pub struct TokenService {
    key: SigningKey,
    default_ttl: i64,
}

/// The three segments of a token, borrowed from the input string.
struct Segments<'a> {
    header: &'a str,
    claims: &'a str,
    signature: &'a str,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> TokenResult<Self> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(claims), Some(signature), None)
                if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
            {
                Ok(Self {
                    header,
                    claims,
                    signature,
                })
            }
            _ => Err(TokenError::MalformedFormat),
        }
    }

    /// Length of `header.claims`, the signed prefix of the token.
    fn signing_input_len(&self) -> usize {
        self.header.len() + 1 + self.claims.len()
    }
}

impl TokenService {
    /// Create a service with the given key and a one hour default TTL.
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
            default_ttl: 3600,
        }
    }

    /// Create a service from validated configuration.
    pub fn from_config(config: &TokenConfig) -> TokenResult<Self> {
        config.validate()?;
        let key = SigningKey::new(config.secret.as_bytes())?;
        Ok(Self::new(key).with_default_ttl(config.ttl_secs))
    }

    /// Set the TTL used by [`TokenService::issue_now`].
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: i64) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// The TTL used by [`TokenService::issue_now`].
    #[must_use]
    pub fn default_ttl(&self) -> i64 {
        self.default_ttl
    }

    /// Issue a token for `subject`, valid from `now` through `now + ttl`.
    ///
    /// # Errors
    ///
    /// [`TokenError::InvalidTtl`] when `ttl <= 0` or `now + ttl` overflows.
    pub fn issue(&self, subject: &str, now: i64, ttl: i64) -> TokenResult<Token> {
        if ttl <= 0 {
            return Err(TokenError::InvalidTtl(ttl));
        }
        let expires_at = now.checked_add(ttl).ok_or(TokenError::InvalidTtl(ttl))?;

        let claims = Claims {
            subject: subject.to_string(),
            issued_at: now,
            expires_at,
        };

        let header_b64 = encode_segment(&Header::hs256())?;
        let claims_b64 = encode_segment(&claims)?;
        let message = format!("{header_b64}.{claims_b64}");
        let signature = signer::sign(message.as_bytes(), &self.key)?;
        let signature_b64 = base64_url_encode(&signature);

        tracing::debug!(subject, issued_at = now, expires_at, "Issued token");
        Ok(Token::from_parts(&header_b64, &claims_b64, &signature_b64))
    }

    /// Issue a token at the current wall-clock time with the default TTL.
    pub fn issue_now(&self, subject: &str) -> TokenResult<Token> {
        self.issue(subject, Utc::now().timestamp(), self.default_ttl)
    }

    /// Verify `token` at time `now` and return its claims.
    ///
    /// Checks run in a fixed order: shape, signature, header and claims
    /// decoding, expiry. The first failure is returned.
    pub fn verify(&self, token: &str, now: i64) -> TokenResult<Claims> {
        let segments = Segments::split(token)?;
        self.check_signature(token, &segments)?;

        let header: Header = decode_segment(segments.header)?;
        if !header.is_supported() {
            return Err(TokenError::schema(format!(
                "unsupported header: alg={} typ={}",
                header.alg, header.typ
            )));
        }

        let claims: Claims = decode_segment(segments.claims)?;
        if claims.is_expired_at(now) {
            tracing::debug!(
                subject = %claims.subject,
                expires_at = claims.expires_at,
                now,
                "Rejected expired token"
            );
            return Err(TokenError::ExpiredToken);
        }
        Ok(claims)
    }

    /// Verify `token` against the current wall-clock time.
    pub fn verify_now(&self, token: &str) -> TokenResult<Claims> {
        self.verify(token, Utc::now().timestamp())
    }

    /// Classify `token` at time `now`.
    #[must_use]
    pub fn status(&self, token: &str, now: i64) -> TokenState {
        match self.verify(token, now) {
            Ok(_) => TokenState::Valid,
            Err(e) if e.is_time_dependent() => TokenState::Expired,
            Err(TokenError::InvalidSignature) => TokenState::InvalidSignature,
            Err(_) => TokenState::Malformed,
        }
    }

    /// Decode both segments without checking the signature or expiry.
    ///
    /// For display and debugging only. Nothing returned here is trustworthy.
    pub fn decode_unverified(token: &str) -> TokenResult<(Header, Claims)> {
        let segments = Segments::split(token)?;
        let header = decode_segment(segments.header)?;
        let claims = decode_segment(segments.claims)?;
        Ok((header, claims))
    }

    fn check_signature(&self, token: &str, segments: &Segments<'_>) -> TokenResult<()> {
        let message = &token.as_bytes()[..segments.signing_input_len()];
        let provided =
            base64_url_decode(segments.signature).map_err(|_| TokenError::InvalidSignature)?;
        if signer::verify(message, &provided, &self.key)? {
            Ok(())
        } else {
            tracing::debug!("Rejected token with invalid signature");
            Err(TokenError::InvalidSignature)
        }
    }
}
