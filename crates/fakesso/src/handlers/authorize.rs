use axum::{
    extract::{Query, Request},
    response::Html,
};
use serde::Deserialize;

use crate::{error::SsoError, state::AppState, templates};

#[derive(Debug, Default, Deserialize)]
pub struct AuthorizeQuery {
    redirect_uri: Option<String>,
    state: Option<String>,
}

/// `/authorize` - render the identifier picker.
///
/// Requires a non-empty `redirect_uri`. `state` is passed through untouched.
pub async fn authorize(state: AppState, req: Request) -> Result<Html<String>, SsoError> {
    // An unparsable query is treated like an empty one.
    let query = Query::<AuthorizeQuery>::try_from_uri(req.uri())
        .map(|Query(query)| query)
        .unwrap_or_default();

    let redirect_uri = query
        .redirect_uri
        .filter(|uri| !uri.is_empty())
        .ok_or(SsoError::BadRequest("No redirect uri given"))?;
    let client_state = query.state.unwrap_or_default();

    let known_ids = if state.settings().show_known_users() {
        state.identities.list_ids().await?
    } else {
        Vec::new()
    };

    let page = templates::authorize_page(&redirect_uri, &client_state, &known_ids);
    Ok(Html(page))
}
