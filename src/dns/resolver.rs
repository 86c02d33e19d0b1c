//! TTL resolvers
//!
//! The guard only needs the TTL of the master record; resolution itself is
//! an external concern behind the `TtlResolver` trait. Production runs use
//! `DigResolver`, which shells out to `dig` and reads the answer-section
//! TTL. Tests substitute fixed resolvers.

use std::process::Command;

use super::errors::{DnsGuardError, DnsResult};

/// Resolves the TTL of a DNS record.
pub trait TtlResolver {
    fn resolve_ttl(&self, fqdn: &str) -> DnsResult<u32>;
}

/// Resolver that invokes `dig <fqdn>` and parses the answer section.
///
/// Answer lines have the shape `<fqdn>.  <ttl>  IN  A  <addr>`; the first
/// line whose name matches the queried FQDN supplies the TTL.
pub struct DigResolver;

impl TtlResolver for DigResolver {
    fn resolve_ttl(&self, fqdn: &str) -> DnsResult<u32> {
        let output = Command::new("dig")
            .arg(fqdn)
            .output()
            .map_err(|e| DnsGuardError::resolution(fqdn, format!("failed to run dig: {}", e)))?;

        if !output.status.success() {
            return Err(DnsGuardError::resolution(
                fqdn,
                format!("dig exited with status {}", output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_answer_ttl(&stdout, fqdn)
    }
}

/// Extract the TTL from dig output for the given FQDN.
fn parse_answer_ttl(dig_output: &str, fqdn: &str) -> DnsResult<u32> {
    for line in dig_output.lines() {
        if !line.starts_with(fqdn) {
            continue;
        }
        // dig prints the owner name with a trailing dot
        let rest = &line[fqdn.len()..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        if let Some(field) = rest.split_whitespace().next() {
            if let Ok(ttl) = field.parse::<u32>() {
                return Ok(ttl);
            }
        }
    }

    Err(DnsGuardError::resolution(
        fqdn,
        "no answer record with a TTL in dig output",
    ))
}
