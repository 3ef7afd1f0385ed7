//! Bearer tokens handed out by `/token` and accepted by `/me`.
//!
//! A token is `base64(identity_id + "|" + nonce)`. Nothing about it is signed or
//! stored; it is valid as long as it decodes and names a known identity.

mod codec;
mod error;

pub use codec::{resolve, BearerToken, NONCE_BYTES, SEPARATOR};
pub use error::TokenError;
