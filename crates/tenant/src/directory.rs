use async_trait::async_trait;
use echoboard_models::{EmailVerification, EmailVerificationKind, Tenant};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Failure modes of a tenant directory lookup
///
/// Callers are expected to match `NotFound` explicitly and treat every
/// other variant as a generic backend failure.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("not found")]
    NotFound,

    #[error("directory backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Lookup service answering tenant and verification-key queries
///
/// Each method is attempted once per request; no retries happen at this
/// layer.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// The single default tenant of a single-host deployment
    async fn first(&self) -> Result<Tenant>;

    /// Find the tenant serving `hostname` (subdomain or custom domain),
    /// compared case-sensitively
    async fn get_by_domain(&self, hostname: &str) -> Result<Tenant>;

    /// Find a verification record by kind and opaque key
    async fn find_verification_by_key(
        &self,
        kind: EmailVerificationKind,
        key: &str,
    ) -> Result<EmailVerification>;

    /// Mark a verification key as consumed; intended to be idempotent
    async fn set_key_as_verified(&self, key: &str) -> Result<()>;
}
