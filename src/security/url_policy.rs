//! URL trust policy.
//!
//! A URL is considered secure when it uses `https`, or `http` against a
//! loopback host (`localhost` or `127.0.0.1`). Anything unparseable is
//! insecure.

use url::{Host, Url};

/// Returns true if `raw` is a URL the gateway is willing to trust.
pub fn is_secure_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };

    match url.scheme() {
        "https" => url.host().is_some(),
        "http" => match url.host() {
            Some(Host::Domain(domain)) => domain == "localhost",
            Some(Host::Ipv4(addr)) => addr.octets() == [127, 0, 0, 1],
            _ => false,
        },
        _ => false,
    }
}

/// Returns true if `raw` is a bare origin: scheme, host and optional port,
/// with nothing after the authority.
pub fn is_bare_origin(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    url.host().is_some()
        && url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && !raw.ends_with('/')
}
