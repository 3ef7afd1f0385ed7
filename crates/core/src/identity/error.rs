use thiserror::Error;

use crate::random::EntropyError;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity id must not be empty")]
    EmptyId,

    #[error(transparent)]
    Entropy(#[from] EntropyError),
}
