/// Multi-label public suffixes the bundled list recognizes. This is not the
/// full Public Suffix List — it's the common set needed to group wildcard
/// queries correctly without pulling in a network fetch or a multi-megabyte
/// bundled dataset; anything not listed here falls back to "last two
/// labels".
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.nz", "co.jp",
    "co.in", "com.br", "com.cn", "co.za", "github.io", "gitlab.io", "pages.dev", "vercel.app",
    "netlify.app", "herokuapp.com", "s3.amazonaws.com", "cloudfront.net",
];

/// Extract the effective registrable domain from a host, for grouping
/// wildcard-aggregation queries (`*.example.com` and `sub.example.com`
/// both belong to `example.com`).
///
/// Consults the bundled multi-label suffix list; hosts under an
/// unrecognized suffix fall back to their last two labels. Never fails —
/// an input with fewer than two labels is returned unchanged.
pub fn root_domain(host: &str) -> String {
    let host = host.trim_start_matches("*.").to_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host;
    }

    for suffix in MULTI_LABEL_SUFFIXES {
        let suffix_labels = suffix.split('.').count();
        if labels.len() > suffix_labels && host.ends_with(&format!(".{suffix}")) {
            let keep = suffix_labels + 1;
            return labels[labels.len() - keep..].join(".");
        }
    }

    labels[labels.len() - 2..].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_domain_keeps_last_two_labels() {
        assert_eq!(root_domain("api.example.com"), "example.com");
    }

    #[test]
    fn wildcard_prefix_is_stripped() {
        assert_eq!(root_domain("*.example.com"), "example.com");
    }

    #[test]
    fn recognizes_multi_label_suffix() {
        assert_eq!(root_domain("www.example.co.uk"), "example.co.uk");
    }

    #[test]
    fn deeply_nested_subdomain_still_resolves() {
        assert_eq!(root_domain("a.b.c.example.com"), "example.com");
    }

    #[test]
    fn single_label_host_is_unchanged() {
        assert_eq!(root_domain("localhost"), "localhost");
    }
}
