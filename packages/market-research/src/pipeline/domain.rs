//! Hostname helpers shared by scoring, dedup and link mining.

use url::Url;

/// Two-label public suffixes that need special handling when stripping a TLD.
const COMPOUND_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.nz", "co.jp",
    "co.in", "com.br", "com.mx", "co.za", "com.sg", "com.cn",
];

/// Lower-cased hostname with a leading `www.` removed.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}

/// Whether `host` is `domain` or one of its subdomains.
pub fn same_site(host: &str, domain: &str) -> bool {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// The registrable name without its public suffix: `acme` for
/// `app.acme.co.uk`.
pub fn domain_name_sans_tld(host: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    let suffix_labels = if COMPOUND_SUFFIXES.iter().any(|s| same_site(host, s) && host != *s) {
        2
    } else {
        1
    };

    match labels.len().checked_sub(suffix_labels + 1) {
        Some(idx) => labels[idx].to_string(),
        None => labels.first().map(|l| l.to_string()).unwrap_or_default(),
    }
}
