// Hostname and base-URL logic for the multi-tenant deployment.

use echoboard_models::Tenant;

/// How the portal is reachable from the outside: scheme, platform domain
/// and the public port when serving off a non-default one
///
/// Built once from configuration at startup.
#[derive(Debug, Clone)]
pub struct PortalUrls {
    pub scheme: String,
    pub platform_domain: String,
    pub port: Option<u16>,
}

impl PortalUrls {
    /// Canonical base URL for a tenant: its custom domain when configured,
    /// otherwise its subdomain under the platform domain
    pub fn tenant_base_url(&self, tenant: &Tenant) -> String {
        match tenant.cname.as_deref() {
            Some(cname) if !cname.is_empty() => {
                format!("{}://{}{}", self.scheme, cname, self.port_suffix())
            }
            _ => format!(
                "{}://{}.{}{}",
                self.scheme,
                tenant.subdomain,
                self.platform_domain,
                self.port_suffix()
            ),
        }
    }

    /// Base URL the current request was served on, from the raw Host value
    /// (port included when present)
    pub fn request_base_url(&self, host: &str) -> String {
        format!("{}://{}", self.scheme, host)
    }

    fn port_suffix(&self) -> String {
        match self.port {
            Some(port) => format!(":{}", port),
            None => String::new(),
        }
    }
}

/// Strip a trailing `:port` from a Host value, leaving the bare hostname
pub fn strip_port(host: &str) -> &str {
    if let Some(idx) = host.rfind(':') {
        let (hostname, port) = (&host[..idx], &host[idx + 1..]);
        if !hostname.is_empty() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            return hostname;
        }
    }
    host
}
