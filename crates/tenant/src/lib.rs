// Tenant resolution core: the directory lookup boundary, the per-request
// context carrier, and the pure hostname/URL logic shared by the middleware.

pub mod context;
pub mod directory;
pub mod urls;

pub use context::{is_ajax, CurrentTenant, RequestContext};
pub use directory::{DirectoryError, TenantDirectory};
pub use urls::{strip_port, PortalUrls};
