/// Host used in published URLs when the request names none.
pub const DEFAULT_HOST: &str = "host.docker.internal";

/// Scheme the client used to reach us.
///
/// A proxy-supplied `X-Forwarded-Proto` wins over the connection itself. Only the
/// first entry of a comma-separated list counts.
pub fn request_scheme(forwarded_proto: Option<&str>, direct_tls: bool) -> &'static str {
    let secure = match forwarded_proto {
        Some(value) => value
            .split(',')
            .next()
            .map(str::trim)
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https")),
        None => direct_tls,
    };

    if secure {
        "https"
    } else {
        "http"
    }
}

/// Base URL (no trailing slash) for endpoint links.
pub fn base_url(scheme: &str, host: Option<&str>) -> String {
    let host = host
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .unwrap_or(DEFAULT_HOST);
    format!("{scheme}://{host}")
}
