pub mod auth;
pub mod tenant;

pub use auth::authenticate;
pub use tenant::{
    check_tenant_privacy, require_active_tenant, resolve_multi_tenant, resolve_single_tenant,
};
