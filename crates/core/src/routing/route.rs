/// The flow step a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` or an empty path: endpoint listing.
    Index,
    /// `/authorize`: identifier picker posting back to the client.
    Authorize,
    /// `/token`: code for bearer token exchange.
    Token,
    /// `/me`: profile lookup for a bearer token.
    UserInfo,
    /// Anything else.
    Unknown,
}

impl Route {
    /// Match a raw request target (path plus optional query) to a route.
    pub fn from_target(target: &str) -> Self {
        match route_key(target).as_str() {
            "" => Self::Index,
            "/authorize" => Self::Authorize,
            "/token" => Self::Token,
            "/me" => Self::UserInfo,
            _ => Self::Unknown,
        }
    }

    /// Canonical path of a routable step.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Self::Index => Some("/"),
            Self::Authorize => Some("/authorize"),
            Self::Token => Some("/token"),
            Self::UserInfo => Some("/me"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Authorize => write!(f, "authorize"),
            Self::Token => write!(f, "token"),
            Self::UserInfo => write!(f, "userinfo"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Normalize a request target into the key used for routing.
///
/// Drops the query string and fragment, lowercases, and strips trailing slashes,
/// so `/Token/?x=1` and `/token` share the key `/token` and `/` becomes `""`.
///
/// # Examples
///
/// ```
/// use fakesso_core::routing::route_key;
///
/// assert_eq!(route_key("/Authorize/?state=abc"), "/authorize");
/// assert_eq!(route_key("/"), "");
/// ```
pub fn route_key(target: &str) -> String {
    let path = target
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.trim_end_matches('/').to_lowercase()
}
