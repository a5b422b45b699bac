// Core modules
pub mod tenant;
pub mod verification;

// Re-export commonly used types
pub use tenant::{Tenant, TenantStatus};
pub use verification::{EmailVerification, EmailVerificationKind};
