mod error;
mod functions;
mod types;
mod validation;

pub use error::IdentityError;
pub use functions::{generate_display_name, generate_email, provision_identity};
pub use types::{Identity, Provisioned};
pub use validation::{is_email, validate_identity_id};
