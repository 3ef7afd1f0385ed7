//! Flow step handlers.
//!
//! Every request goes through [`dispatch`], which routes on the normalized path
//! alone. The HTTP method is ignored.

pub mod authorize;
pub mod index;
pub mod token;
pub mod userinfo;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};

use fakesso_core::routing::Route;

use crate::{error::SsoError, state::AppState};

/// Fallback handler answering every request.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let route = Route::from_target(req.uri().path());
    tracing::debug!(
        %route,
        method = %req.method(),
        path = %req.uri().path(),
        "Dispatching request"
    );

    match route {
        Route::Index => index::index(req).into_response(),
        Route::Authorize => authorize::authorize(state, req).await.into_response(),
        Route::Token => token::token(state, req).await.into_response(),
        Route::UserInfo => userinfo::userinfo(state, req).await.into_response(),
        Route::Unknown => SsoError::NotFound.into_response(),
    }
}
