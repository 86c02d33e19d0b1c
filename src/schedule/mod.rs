//! Backup scheduling
//!
//! Per LIFECYCLE_MODEL.md §6:
//! - master slots default to disabled; masters do not auto-backup
//! - slave slots always fire, jittered per node so a fleet does not
//!   snapshot in lockstep
//! - jitter is a pure function of a seed drawn once at provisioning and
//!   persisted with the node state, never re-drawn per run

mod cron;
mod errors;
mod jitter;

pub use errors::ScheduleError;
pub use jitter::{draw_seed, generate};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cron time field: disabled, wildcard, or a fixed value.
///
/// Disabled renders as an empty string, matching the convention that an
/// empty cron field means "never fire" in the fleet's backup tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CronField {
    /// Never fires.
    Disabled,
    /// Fires every unit (`*`).
    Every,
    /// Fires at a fixed value, possibly jitter-drawn.
    At(u8),
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CronField::Disabled => Ok(()),
            CronField::Every => write!(f, "*"),
            CronField::At(value) => write!(f, "{}", value),
        }
    }
}

/// Hour/minute pair for one backup slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSlot {
    pub hour: CronField,
    pub minute: CronField,
}

impl CronSlot {
    /// A slot that never fires (master default).
    pub fn disabled() -> Self {
        Self {
            hour: CronField::Disabled,
            minute: CronField::Disabled,
        }
    }

    pub fn new(hour: CronField, minute: CronField) -> Self {
        Self { hour, minute }
    }

    /// A slot fires only when both fields are set.
    pub fn is_enabled(&self) -> bool {
        self.hour != CronField::Disabled && self.minute != CronField::Disabled
    }

    /// Render as a five-field cron expression, `None` when disabled.
    pub fn cron_expression(&self) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        Some(format!("{} {} * * *", self.minute, self.hour))
    }

    /// Next time this slot fires after `after`, `None` when disabled.
    pub fn next_occurrence(
        &self,
        after: &DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, ScheduleError> {
        match self.cron_expression() {
            Some(expression) => cron::next_occurrence(&expression, after).map(Some),
            None => Ok(None),
        }
    }
}

/// Master and slave slots for one backup tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSchedule {
    pub master: CronSlot,
    pub slave: CronSlot,
}

/// Full per-node backup schedule: primary and secondary tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSchedule {
    pub primary: TierSchedule,
    pub secondary: TierSchedule,
}

impl BackupSchedule {
    /// The slot for the given tier and role.
    pub fn slot(&self, tier: Tier, master: bool) -> &CronSlot {
        let tier_schedule = match tier {
            Tier::Primary => &self.primary,
            Tier::Secondary => &self.secondary,
        };
        if master {
            &tier_schedule.master
        } else {
            &tier_schedule.slave
        }
    }
}

/// Backup tier selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Secondary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cron_field_rendering() {
        assert_eq!(CronField::Disabled.to_string(), "");
        assert_eq!(CronField::Every.to_string(), "*");
        assert_eq!(CronField::At(17).to_string(), "17");
    }

    #[test]
    fn test_disabled_slot_has_no_expression() {
        assert_eq!(CronSlot::disabled().cron_expression(), None);
        assert!(!CronSlot::disabled().is_enabled());
    }

    #[test]
    fn test_hourly_slot_expression() {
        let slot = CronSlot::new(CronField::Every, CronField::At(30));
        assert_eq!(slot.cron_expression().unwrap(), "30 * * * *");
    }

    #[test]
    fn test_daily_slot_expression() {
        let slot = CronSlot::new(CronField::At(3), CronField::At(5));
        assert_eq!(slot.cron_expression().unwrap(), "5 3 * * *");
    }

    #[test]
    fn test_half_disabled_slot_never_fires() {
        let slot = CronSlot::new(CronField::Every, CronField::Disabled);
        assert!(!slot.is_enabled());
        assert_eq!(slot.cron_expression(), None);
    }

    #[test]
    fn test_disabled_slot_next_occurrence_is_none() {
        let now = Utc::now();
        assert_eq!(CronSlot::disabled().next_occurrence(&now).unwrap(), None);
    }

    #[test]
    fn test_slot_selector() {
        let schedule = generate(7);
        assert!(!schedule.slot(Tier::Primary, true).is_enabled());
        assert!(schedule.slot(Tier::Primary, false).is_enabled());
        assert!(!schedule.slot(Tier::Secondary, true).is_enabled());
        assert!(schedule.slot(Tier::Secondary, false).is_enabled());
    }
}
