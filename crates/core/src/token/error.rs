use thiserror::Error;

use crate::random::EntropyError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed bearer token: {0}")]
    Malformed(&'static str),

    #[error(transparent)]
    Entropy(#[from] EntropyError),
}
