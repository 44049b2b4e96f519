//! Guards for caller-supplied URLs.
//!
//! `extract_pricing` fetches whatever URL the caller hands it, so every
//! fetch passes through [`UrlValidator`] first. Only public `http`/`https`
//! hosts get through: loopback, private ranges, link-local metadata
//! endpoints and `.internal`/`.local` names are refused.

use std::collections::HashSet;
use std::net::IpAddr;

use ipnet::IpNet;
use url::{Host, Url};

use crate::error::{SecurityError, SecurityResult};

const BLOCKED_RANGES: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "::/128",
    "::1/128",
    "fc00::/7",
    "fe80::/10",
];

const BLOCKED_NAMES: &[&str] = &["localhost", "instance-data", "metadata.google.internal"];

const BLOCKED_SUFFIXES: &[&str] = &[".localhost", ".internal", ".local"];

#[derive(Debug, Clone)]
pub struct UrlValidator {
    ranges: Vec<IpNet>,
    blocked: HashSet<String>,
    /// Hosts that skip every check (local test servers)
    trusted: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    pub fn new() -> Self {
        Self {
            ranges: BLOCKED_RANGES.iter().filter_map(|r| r.parse().ok()).collect(),
            blocked: BLOCKED_NAMES.iter().map(|h| h.to_string()).collect(),
            trusted: HashSet::new(),
        }
    }

    /// Let `host` through unchecked.
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.trusted.insert(host.into().to_ascii_lowercase());
        self
    }

    /// Refuse `host` in addition to the built-in names.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.blocked.insert(host.into().to_ascii_lowercase());
        self
    }

    /// Check scheme and host without resolving anything.
    pub fn validate(&self, url: &str) -> SecurityResult<()> {
        self.check_url(&Url::parse(url)?).map(|_| ())
    }

    /// [`validate`](Self::validate), then resolve the hostname and check
    /// every address it points at.
    pub async fn validate_with_dns(&self, url: &str) -> SecurityResult<()> {
        let parsed = Url::parse(url)?;
        let Some(domain) = self.check_url(&parsed)? else {
            return Ok(());
        };

        let port = parsed.port_or_known_default().unwrap_or(443);
        let addrs = tokio::net::lookup_host((domain.as_str(), port))
            .await
            .map_err(|e| SecurityError::DnsResolution(format!("{domain}: {e}")))?;

        for addr in addrs {
            if self.is_blocked_ip(addr.ip()) {
                return Err(SecurityError::BlockedCidr(format!(
                    "{domain} resolves to {}",
                    addr.ip()
                )));
            }
        }
        Ok(())
    }

    /// Returns the hostname still needing a DNS check, if any.
    fn check_url(&self, url: &Url) -> SecurityResult<Option<String>> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SecurityError::DisallowedScheme(url.scheme().to_string()));
        }

        let host = url.host().ok_or(SecurityError::NoHost)?;
        let ip = match host {
            Host::Domain(name) => {
                let name = name.trim_end_matches('.').to_ascii_lowercase();
                if self.trusted.contains(&name) {
                    return Ok(None);
                }
                if self.blocked.contains(&name)
                    || BLOCKED_SUFFIXES.iter().any(|s| name.ends_with(s))
                {
                    return Err(SecurityError::BlockedHost(name));
                }
                return Ok(Some(name));
            }
            Host::Ipv4(ip) => IpAddr::V4(ip),
            Host::Ipv6(ip) => IpAddr::V6(ip),
        };

        if self.trusted.contains(&ip.to_string()) {
            return Ok(None);
        }
        if self.is_blocked_ip(ip) {
            return Err(SecurityError::BlockedCidr(ip.to_string()));
        }
        Ok(None)
    }

    fn is_blocked_ip(&self, ip: IpAddr) -> bool {
        // ::ffff:10.0.0.1 is still 10.0.0.1
        let ip = match ip {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
            v4 => v4,
        };
        self.ranges.iter().any(|range| range.contains(&ip))
    }
}
