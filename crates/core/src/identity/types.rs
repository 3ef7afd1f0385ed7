use serde::{Deserialize, Serialize};

/// A provisioned identity as stored and returned by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Caller-supplied identifier, also the primary key.
    pub id: String,
    /// Generated display name, fixed at creation.
    pub name: String,
    /// The id itself when it is an email address, otherwise generated.
    pub email: String,
}

/// Outcome of a get-or-create call on the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    /// The identity already existed and was loaded.
    Found(Identity),
    /// The identity was absent and has just been stored.
    Created(Identity),
}

impl Provisioned {
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Found(identity) | Self::Created(identity) => identity,
        }
    }

    pub fn into_identity(self) -> Identity {
        match self {
            Self::Found(identity) | Self::Created(identity) => identity,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
