//! Master DNS TTL safety
//!
//! Per LIFECYCLE_MODEL.md §4:
//! - A master DNS record with a TTL above the operator's failover tolerance
//!   can leave stale answers pointing at a demoted master after promotion.
//! - The guard refuses to proceed when the observed TTL exceeds the limit.
//! - The `localhost` sentinel bypasses the check entirely, including the
//!   resolver call.
//! - Resolver failures are fatal for the run; no retries at this layer.

mod errors;
mod guard;
mod resolver;

pub use errors::{DnsGuardError, DnsResult};
pub use guard::{check_master_ttl, LOCAL_FQDN};
pub use resolver::{DigResolver, TtlResolver};
