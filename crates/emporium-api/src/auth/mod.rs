pub mod middleware;

pub use middleware::{check_admin_session, require_admin_session, AccessDecision};
