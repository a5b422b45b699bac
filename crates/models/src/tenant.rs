use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer workspace, addressed by subdomain or custom domain
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,

    /// Vanity hostname configured by the tenant, distinct from the
    /// platform's default domain
    pub cname: Option<String>,

    pub status: TenantStatus,
    pub is_private: bool,

    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn has_cname(&self) -> bool {
        self.cname.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Tenant lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
    PendingDeletion,
}
