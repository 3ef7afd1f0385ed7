use axum::{
    extract::Request,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;

use fakesso_core::{storage::RepositoryError, token};

use crate::{error::SsoError, state::AppState};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub sub: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, SsoError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(SsoError::Unauthorized("No authorization header passed"))?
        .to_str()
        .map_err(|_| SsoError::Unauthorized("Invalid authorization header"))?;

    // A bare token without the scheme is accepted too.
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        return Err(SsoError::Unauthorized("Invalid authorization header"));
    }

    Ok(token)
}

/// `/me` - profile of the identity a bearer token was issued for.
pub async fn userinfo(state: AppState, req: Request) -> Result<Json<UserInfo>, SsoError> {
    let settings = state.settings();

    let identity_id = token::resolve(bearer_token(req.headers())?)?;

    let identity = match state.identities.get_identity(&identity_id).await {
        Ok(identity) => identity,
        Err(RepositoryError::NotFound { .. }) => {
            tracing::debug!(%identity_id, "Token references unknown identity");
            return Err(SsoError::Unauthorized("Unknown user"));
        }
        Err(err) => return Err(err.into()),
    };

    let id = settings.additional_fields().then(|| identity.id.clone());

    Ok(Json(UserInfo {
        sub: identity.id,
        name: identity.name,
        email: identity.email,
        id,
    }))
}
