use axum::{
    extract::{FromRequest, Request},
    http::Method,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use fakesso_core::token::BearerToken;

use crate::{error::SsoError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct TokenForm {
    code: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `/token` - exchange an identifier for a bearer token.
///
/// The client secret is checked before the code, so a rejected caller never
/// provisions an identity.
pub async fn token(state: AppState, req: Request) -> Result<Json<TokenResponse>, SsoError> {
    let settings = state.settings();

    // Only a posted body counts. `Form` would read the query string of a GET.
    let form = if req.method() == Method::POST {
        Form::<TokenForm>::from_request(req, &())
            .await
            .map(|Form(form)| form)
            .unwrap_or_default()
    } else {
        TokenForm::default()
    };

    let expected_secret = settings.client_secret();
    if !expected_secret.is_empty() && form.client_secret.as_deref() != Some(&*expected_secret) {
        return Err(SsoError::Unauthorized("Invalid client secret"));
    }

    let code = form.code.as_deref().map(str::trim).unwrap_or_default();
    if code.is_empty() {
        return Err(SsoError::BadRequest("No code given"));
    }

    let provisioned = state.identities.get_or_create(code).await?;
    tracing::info!(
        identity_id = %provisioned.identity().id,
        created = provisioned.was_created(),
        "Issuing access token"
    );

    let token = BearerToken::issue(provisioned.into_identity().id)?;

    Ok(Json(TokenResponse {
        access_token: token.encode(),
    }))
}
