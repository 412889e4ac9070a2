use url::Url;

/// Canonicalize a raw target string the way the store keys identity on it.
///
/// If the input parses as a URL with a host: lowercase the host, strip
/// default ports (`:80` for http, `:443` for https), drop a trailing slash
/// from the path, and default a missing scheme to `https`. Otherwise:
/// lowercase the string and trim a trailing `.` or `/`.
///
/// Never fails — unparseable input falls through to the plain-string path.
pub fn canonicalize_target(raw: &str) -> String {
    canonicalize(raw, "https")
}

/// Same canonicalization as [`canonicalize_target`], except the original
/// scheme is kept (not forced to `https`) when present — program URLs are
/// sometimes intentionally `http://` legacy disclosure pages.
pub fn canonicalize_program_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_with_host(trimmed, None) {
        Some(url) => render(&url),
        None => plain_fallback(trimmed),
    }
}

fn canonicalize(raw: &str, default_scheme: &str) -> String {
    let trimmed = raw.trim();
    match parse_with_host(trimmed, Some(default_scheme)) {
        Some(url) => render(&url),
        None => plain_fallback(trimmed),
    }
}

/// Try to parse `input` as a URL with a host. When `default_scheme` is
/// `Some`, a schemeless input (`example.com/path`) is retried with that
/// scheme prefixed; when `None`, a schemeless input is left unparsed so the
/// caller keeps whatever scheme was actually present.
fn parse_with_host(input: &str, default_scheme: Option<&str>) -> Option<Url> {
    if let Ok(url) = Url::parse(input) {
        if url.host().is_some() {
            return Some(url);
        }
    }

    if let Some(scheme) = default_scheme {
        // Only guess a scheme for things that look like a multi-label
        // domain. A bare single-label word ("CIDR-Block") or a bare IP/CIDR
        // range ("10.0.0.0/24", trailing all-digit label) isn't one.
        if !looks_like_domain(input) {
            return None;
        }

        let candidate = format!("{scheme}://{input}");
        if let Ok(url) = Url::parse(&candidate) {
            if url.host().is_some() {
                return Some(url);
            }
        }
    }

    None
}

fn looks_like_domain(input: &str) -> bool {
    let authority = input.split('/').next().unwrap_or(input);
    if !authority.contains('.') {
        return false;
    }
    match authority.rsplit('.').next() {
        Some(last_label) if !last_label.is_empty() => {
            !last_label.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn render(url: &Url) -> String {
    let scheme = url.scheme();
    let host = url.host_str().unwrap_or_default().to_lowercase();

    let is_default_port = matches!(
        (scheme, url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );

    let mut out = format!("{scheme}://{host}");
    if let (Some(port), false) = (url.port(), is_default_port) {
        out.push(':');
        out.push_str(&port.to_string());
    }

    let mut path = url.path();
    if path.len() > 1 {
        path = path.trim_end_matches('/');
    }
    if !path.is_empty() && path != "/" {
        out.push_str(path);
    }

    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }

    out
}

fn plain_fallback(trimmed: &str) -> String {
    trimmed
        .to_lowercase()
        .trim_end_matches(['.', '/'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_host_and_defaults_scheme() {
        assert_eq!(canonicalize_target("Example.COM"), "https://example.com");
    }

    #[test]
    fn strips_default_https_port() {
        assert_eq!(
            canonicalize_target("https://example.com:443/"),
            "https://example.com"
        );
    }

    #[test]
    fn strips_default_http_port() {
        assert_eq!(
            canonicalize_target("http://example.com:80/path/"),
            "http://example.com/path"
        );
    }

    #[test]
    fn keeps_non_default_port() {
        assert_eq!(
            canonicalize_target("https://example.com:8443"),
            "https://example.com:8443"
        );
    }

    #[test]
    fn strips_trailing_slash_from_path() {
        assert_eq!(
            canonicalize_target("https://example.com/api/"),
            "https://example.com/api"
        );
    }

    #[test]
    fn non_url_input_is_lowercased_and_trimmed() {
        assert_eq!(canonicalize_target("  CIDR-Block/24.  "), "cidr-block/24");
    }

    #[test]
    fn cidr_range_is_not_mistaken_for_a_url() {
        assert_eq!(canonicalize_target("10.0.0.0/24"), "10.0.0.0/24");
    }

    #[test]
    fn wildcard_domain_is_not_mistaken_for_a_url() {
        // "*.example.com" has no parseable scheme/host as a bare wildcard.
        assert_eq!(canonicalize_target("*.EXAMPLE.com"), "*.example.com");
    }

    #[test]
    fn program_url_keeps_explicit_http_scheme() {
        assert_eq!(
            canonicalize_program_url("HTTP://Example.com/program"),
            "http://example.com/program"
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let inputs = [
            "Example.COM",
            "https://example.com:443/",
            "  CIDR-Block/24.  ",
            "*.EXAMPLE.com",
            "10.0.0.0/24",
        ];
        for input in inputs {
            let once = canonicalize_target(input);
            let twice = canonicalize_target(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
