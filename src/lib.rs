//! dbsteward - role lifecycle orchestrator for replicated database nodes
//!
//! Fleet nodes are provisioned from a common image; on every boot, one
//! idempotent lifecycle pass determines the node's role, enforces the DNS
//! TTL safety bound, installs the engine through the provider capability,
//! registers master or slave, and applies privilege grants. See
//! LIFECYCLE_MODEL.md.

pub mod cli;
pub mod config;
pub mod dns;
pub mod lifecycle;
pub mod observability;
pub mod privileges;
pub mod schedule;
