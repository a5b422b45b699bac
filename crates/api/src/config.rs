use echoboard_database::DatabaseConfig;
use echoboard_tenant::PortalUrls;
use std::path::PathBuf;

/// Deployment variant: one fixed tenant, or many selected by hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Process-wide configuration, read once at startup and injected into the
/// middleware constructors
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub host_mode: HostMode,
    pub environment: Environment,

    /// Scheme the portal is served on externally
    pub scheme: String,
    /// Domain tenants live under as subdomains
    pub platform_domain: String,
    /// Public port, when not the scheme's default
    pub public_port: Option<u16>,
    /// Canonical URL of the marketing site
    pub marketing_url: String,

    /// Directory holding legal-page files
    pub etc_dir: PathBuf,

    pub jwt_secret: String,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            host_mode: match std::env::var("HOST_MODE").as_deref() {
                Ok("single") => HostMode::Single,
                _ => HostMode::Multi,
            },
            environment: match std::env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            scheme: std::env::var("PUBLIC_SCHEME").unwrap_or_else(|_| "https".to_string()),
            platform_domain: std::env::var("PLATFORM_DOMAIN")
                .unwrap_or_else(|_| "echoboard.io".to_string()),
            public_port: std::env::var("PUBLIC_PORT").ok().and_then(|v| v.parse().ok()),
            marketing_url: std::env::var("MARKETING_URL")
                .unwrap_or_else(|_| "https://getechoboard.com".to_string()),
            etc_dir: std::env::var("ETC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("etc")),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            database: DatabaseConfig::from_env(),
        }
    }

    /// Hostname of the marketing site for the running environment; requests
    /// arriving on it are redirected before any tenant lookup
    pub fn marketing_hostname(&self) -> String {
        match self.environment {
            Environment::Production => self.platform_domain.clone(),
            Environment::Development => format!("dev.{}", self.platform_domain),
        }
    }

    pub fn urls(&self) -> PortalUrls {
        PortalUrls {
            scheme: self.scheme.clone(),
            platform_domain: self.platform_domain.clone(),
            port: self.public_port,
        }
    }
}
