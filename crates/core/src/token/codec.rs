use base64::{engine::general_purpose::STANDARD, Engine};

use crate::random::random_hex;

use super::TokenError;

/// Random bytes in each token's nonce (rendered as twice as many hex chars).
pub const NONCE_BYTES: usize = 10;

/// Separates the identity id from the nonce inside the decoded token.
pub const SEPARATOR: char = '|';

/// A decoded bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    identity_id: String,
    nonce: String,
}

impl BearerToken {
    /// Issue a fresh token for `identity_id` with a random nonce.
    pub fn issue(identity_id: impl Into<String>) -> Result<Self, TokenError> {
        Ok(Self {
            identity_id: identity_id.into(),
            nonce: random_hex(NONCE_BYTES)?,
        })
    }

    pub fn identity_id(&self) -> &str {
        &self.identity_id
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn into_identity_id(self) -> String {
        self.identity_id
    }

    /// Render the transport form of this token.
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}{SEPARATOR}{}", self.identity_id, self.nonce))
    }

    /// Parse the transport form back into its parts.
    ///
    /// The split happens at the first separator, so the identity id never contains
    /// one. The nonce is carried along but not checked.
    pub fn decode(raw: &str) -> Result<Self, TokenError> {
        let bytes = STANDARD
            .decode(raw)
            .map_err(|_| TokenError::Malformed("not base64"))?;
        let decoded =
            String::from_utf8(bytes).map_err(|_| TokenError::Malformed("not utf-8"))?;

        let (identity_id, nonce) = decoded
            .split_once(SEPARATOR)
            .ok_or(TokenError::Malformed("missing separator"))?;

        Ok(Self {
            identity_id: identity_id.to_string(),
            nonce: nonce.to_string(),
        })
    }
}

/// Extract the identity id a token was issued for.
///
/// Does not check that the identity exists.
pub fn resolve(raw: &str) -> Result<String, TokenError> {
    BearerToken::decode(raw).map(BearerToken::into_identity_id)
}
