use axum::{
    extract::Request,
    http::{header, uri::Scheme},
    response::Html,
};

use fakesso_core::routing::{base_url, request_scheme};

use crate::templates;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// `/` - list the endpoint URLs as this client sees them.
pub fn index(req: Request) -> Html<String> {
    let headers = req.headers();

    let forwarded_proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok());
    // `axum::serve` speaks plain HTTP, so only an absolute-form `https://` target sets this.
    let direct_tls = req.uri().scheme() == Some(&Scheme::HTTPS);
    let scheme = request_scheme(forwarded_proto, direct_tls);

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()));

    Html(templates::index_page(&base_url(scheme, host)))
}
