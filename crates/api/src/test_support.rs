// Shared fixtures for router-level tests: an in-memory tenant directory
// and request helpers.

use crate::config::{Config, Environment, HostMode};
use crate::middleware::auth::Claims;
use crate::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use echoboard_database::DatabaseConfig;
use echoboard_models::{EmailVerification, EmailVerificationKind, Tenant, TenantStatus};
use echoboard_tenant::{directory, DirectoryError, TenantDirectory};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";
pub const PLATFORM_DOMAIN: &str = "echoboard.io";

/// In-memory tenant directory that counts domain lookups
#[derive(Default)]
pub struct MockDirectory {
    pub tenants: Vec<Tenant>,
    pub verifications: Mutex<HashMap<String, EmailVerification>>,
    pub domain_lookups: AtomicUsize,
    pub fail_lookups: bool,
}

impl MockDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tenant(tenant: Tenant) -> Self {
        Self {
            tenants: vec![tenant],
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Default::default()
        }
    }

    pub fn add_verification(self, record: EmailVerification) -> Self {
        self.verifications
            .lock()
            .unwrap()
            .insert(record.key.clone(), record);
        self
    }

    pub fn verification(&self, key: &str) -> Option<EmailVerification> {
        self.verifications.lock().unwrap().get(key).cloned()
    }

    pub fn lookups(&self) -> usize {
        self.domain_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantDirectory for MockDirectory {
    async fn first(&self) -> directory::Result<Tenant> {
        if self.fail_lookups {
            return Err(DirectoryError::Backend(anyhow::anyhow!("boom")));
        }
        self.tenants.first().cloned().ok_or(DirectoryError::NotFound)
    }

    async fn get_by_domain(&self, hostname: &str) -> directory::Result<Tenant> {
        self.domain_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(DirectoryError::Backend(anyhow::anyhow!("boom")));
        }
        self.tenants
            .iter()
            .find(|t| {
                format!("{}.{}", t.subdomain, PLATFORM_DOMAIN) == hostname
                    || t.cname.as_deref() == Some(hostname)
            })
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn find_verification_by_key(
        &self,
        kind: EmailVerificationKind,
        key: &str,
    ) -> directory::Result<EmailVerification> {
        self.verifications
            .lock()
            .unwrap()
            .get(key)
            .filter(|record| record.kind == kind)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn set_key_as_verified(&self, key: &str) -> directory::Result<()> {
        if let Some(record) = self.verifications.lock().unwrap().get_mut(key) {
            if record.verified_at.is_none() {
                record.verified_at = Some(Utc::now());
            }
        }
        Ok(())
    }
}

pub fn tenant(subdomain: &str) -> Tenant {
    Tenant {
        id: Uuid::new_v4(),
        name: subdomain.to_string(),
        subdomain: subdomain.to_string(),
        cname: None,
        status: TenantStatus::Active,
        is_private: false,
        created_at: Utc::now(),
    }
}

pub fn verification(
    key: &str,
    kind: EmailVerificationKind,
    expires_in_hours: i64,
) -> EmailVerification {
    EmailVerification {
        key: key.to_string(),
        kind,
        email: "jane@example.com".to_string(),
        expires_at: Utc::now() + Duration::hours(expires_in_hours),
        verified_at: None,
        created_at: Utc::now(),
    }
}

pub fn test_config(host_mode: HostMode, environment: Environment) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        host_mode,
        environment,
        scheme: "https".to_string(),
        platform_domain: PLATFORM_DOMAIN.to_string(),
        public_port: None,
        marketing_url: "https://getechoboard.com".to_string(),
        etc_dir: PathBuf::from("etc"),
        jwt_secret: JWT_SECRET.to_string(),
        database: DatabaseConfig::default(),
    }
}

pub fn app(config: Config, directory: Arc<MockDirectory>) -> Router {
    let state = Arc::new(AppState {
        config,
        tenants: directory,
    });
    crate::routes::create_router(state)
}

pub fn get(uri: &str, host: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn auth_token() -> String {
    let claims = Claims {
        sub: "jane".to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
