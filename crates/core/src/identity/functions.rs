use crate::random::{random_hex, EntropyError};

use super::{is_email, validate_identity_id, Identity, IdentityError};

/// Random bytes behind each of the two display name words.
const NAME_WORD_BYTES: usize = 4;
/// Random bytes behind the local part of a generated email.
const EMAIL_LOCAL_BYTES: usize = 6;
/// Random bytes behind the domain label of a generated email.
const EMAIL_DOMAIN_BYTES: usize = 5;
/// Generated addresses never leave the machine.
const EMAIL_TLD: &str = "localhost";

/// Generate a display name made of two random hex words, e.g. `"9f3a01bc 77d2e4f0"`.
pub fn generate_display_name() -> Result<String, EntropyError> {
    Ok(format!(
        "{} {}",
        random_hex(NAME_WORD_BYTES)?,
        random_hex(NAME_WORD_BYTES)?
    ))
}

/// Generate a throwaway email address under `.localhost`.
pub fn generate_email() -> Result<String, EntropyError> {
    Ok(format!(
        "{}@{}.{EMAIL_TLD}",
        random_hex(EMAIL_LOCAL_BYTES)?,
        random_hex(EMAIL_DOMAIN_BYTES)?
    ))
}

/// Build the record a store persists the first time it sees `id`.
///
/// When `id` is itself an email address it doubles as the identity's email.
pub fn provision_identity(id: &str) -> Result<Identity, IdentityError> {
    let id = validate_identity_id(id)?;

    let email = if is_email(id) {
        id.to_string()
    } else {
        generate_email()?
    };

    Ok(Identity {
        id: id.to_string(),
        name: generate_display_name()?,
        email,
    })
}
