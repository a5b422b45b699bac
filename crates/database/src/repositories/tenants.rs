use crate::error::{DatabaseError, Result};
use async_trait::async_trait;
use echoboard_models::{EmailVerification, EmailVerificationKind, Tenant};
use echoboard_tenant::TenantDirectory;
use sqlx::PgPool;

/// Postgres-backed tenant directory
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
    platform_domain: String,
}

impl TenantRepository {
    pub fn new(pool: PgPool, platform_domain: String) -> Self {
        Self {
            pool,
            platform_domain,
        }
    }

    /// The default tenant of a single-host deployment
    pub async fn first(&self) -> Result<Tenant> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY id LIMIT 1")
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Tenant", "default"))?;

        Ok(tenant)
    }

    /// Find tenant by hostname, matching either the subdomain label under
    /// the platform domain or an exact custom-domain value
    pub async fn get_by_domain(&self, hostname: &str) -> Result<Tenant> {
        let subdomain = hostname
            .strip_suffix(&format!(".{}", self.platform_domain))
            .unwrap_or(hostname);

        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE subdomain = $1 OR cname = $2",
        )
        .bind(subdomain)
        .bind(hostname)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Tenant", hostname))?;

        Ok(tenant)
    }

    pub async fn find_verification_by_key(
        &self,
        kind: EmailVerificationKind,
        key: &str,
    ) -> Result<EmailVerification> {
        let record = sqlx::query_as::<_, EmailVerification>(
            "SELECT * FROM email_verifications WHERE kind = $1 AND key = $2",
        )
        .bind(kind)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("EmailVerification", key))?;

        Ok(record)
    }

    /// Mark a verification key as consumed; a no-op when already verified
    pub async fn set_key_as_verified(&self, key: &str) -> Result<()> {
        sqlx::query(
            "UPDATE email_verifications SET verified_at = NOW() WHERE key = $1 AND verified_at IS NULL",
        )
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TenantDirectory for TenantRepository {
    async fn first(&self) -> echoboard_tenant::directory::Result<Tenant> {
        Ok(TenantRepository::first(self).await?)
    }

    async fn get_by_domain(&self, hostname: &str) -> echoboard_tenant::directory::Result<Tenant> {
        Ok(TenantRepository::get_by_domain(self, hostname).await?)
    }

    async fn find_verification_by_key(
        &self,
        kind: EmailVerificationKind,
        key: &str,
    ) -> echoboard_tenant::directory::Result<EmailVerification> {
        Ok(TenantRepository::find_verification_by_key(self, kind, key).await?)
    }

    async fn set_key_as_verified(&self, key: &str) -> echoboard_tenant::directory::Result<()> {
        Ok(TenantRepository::set_key_as_verified(self, key).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Database, DatabaseConfig};

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_get_by_domain_misses_cleanly() {
        let db = Database::new(DatabaseConfig::from_env())
            .await
            .expect("Failed to connect to database");
        let repo = TenantRepository::new(db.pool().clone(), "echoboard.io".to_string());

        let err = repo
            .get_by_domain("nobody.echoboard.io")
            .await
            .expect_err("expected a miss");
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }
}
