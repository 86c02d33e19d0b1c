//! TTL guard
//!
//! Per LIFECYCLE_MODEL.md §4: the guard runs before any registration step
//! may trust DNS-based master discovery.

use super::errors::{DnsGuardError, DnsResult};
use super::resolver::TtlResolver;

/// Sentinel FQDN meaning no external DNS is in play.
pub const LOCAL_FQDN: &str = "localhost";

/// Check that the master record's TTL is within the configured limit.
///
/// - `fqdn == LOCAL_FQDN` succeeds without consulting the resolver.
/// - An observed TTL above `limit_secs` fails with `TtlExceeded` carrying
///   the observed and limit values.
/// - Resolver failures propagate unchanged.
pub fn check_master_ttl(
    fqdn: &str,
    limit_secs: u32,
    resolver: &dyn TtlResolver,
) -> DnsResult<()> {
    if fqdn == LOCAL_FQDN {
        return Ok(());
    }

    let observed = resolver.resolve_ttl(fqdn)?;
    if observed > limit_secs {
        return Err(DnsGuardError::ttl_exceeded(fqdn, observed, limit_secs));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolver that always answers with a fixed TTL.
    struct FixedResolver(u32);

    impl TtlResolver for FixedResolver {
        fn resolve_ttl(&self, _fqdn: &str) -> DnsResult<u32> {
            Ok(self.0)
        }
    }

    /// Resolver that must never be consulted.
    struct UnreachableResolver;

    impl TtlResolver for UnreachableResolver {
        fn resolve_ttl(&self, fqdn: &str) -> DnsResult<u32> {
            panic!("resolver consulted for {}", fqdn);
        }
    }

    /// Resolver that fails every lookup.
    struct FailingResolver;

    impl TtlResolver for FailingResolver {
        fn resolve_ttl(&self, fqdn: &str) -> DnsResult<u32> {
            Err(DnsGuardError::resolution(fqdn, "resolver unreachable"))
        }
    }

    #[test]
    fn test_localhost_bypasses_resolver() {
        let result = check_master_ttl(LOCAL_FQDN, 60, &UnreachableResolver);
        assert!(result.is_ok());
    }

    #[test]
    fn test_ttl_at_limit_passes() {
        assert!(check_master_ttl("db.example.com", 60, &FixedResolver(60)).is_ok());
    }

    #[test]
    fn test_ttl_below_limit_passes() {
        assert!(check_master_ttl("db.example.com", 60, &FixedResolver(30)).is_ok());
    }

    #[test]
    fn test_ttl_above_limit_fails_with_values() {
        let result = check_master_ttl("db.example.com", 60, &FixedResolver(120));
        assert_eq!(
            result,
            Err(DnsGuardError::TtlExceeded {
                fqdn: "db.example.com".to_string(),
                observed: 120,
                limit: 60,
            })
        );
    }

    #[test]
    fn test_resolution_failure_propagates() {
        let result = check_master_ttl("db.example.com", 60, &FailingResolver);
        assert!(matches!(result, Err(DnsGuardError::Resolution { .. })));
    }
}
