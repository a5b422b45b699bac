use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single-use email verification key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailVerification {
    pub key: String,
    pub kind: EmailVerificationKind,
    pub email: String,
    pub expires_at: DateTime<Utc>,

    /// Set once the key has been consumed; a verified key can never be
    /// validated again
    pub verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Purpose of an email verification key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmailVerificationKind {
    SignIn,
    SignUp,
    ChangeEmail,
}
