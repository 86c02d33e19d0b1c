//! Schedule jitter generator
//!
//! If every node in a fleet snapshotted at the same moment, the storage API
//! would see a synchronized load spike. Jitter spreads the slots: the
//! primary slave backup fires every hour at a random minute, the secondary
//! once daily at a random hour and minute.
//!
//! `generate` is a pure function of the seed. The caller draws a seed once
//! at provisioning, persists it with the schedule, and reuses the stored
//! schedule on every later run (LIFECYCLE_MODEL.md §6).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BackupSchedule, CronField, CronSlot, TierSchedule};

/// Draw a fresh jitter seed from OS entropy. Called once per node.
pub fn draw_seed() -> u64 {
    rand::thread_rng().gen()
}

/// Generate the per-node backup schedule from a seed.
///
/// Master slots stay disabled; enabling master backups is an explicit
/// operator override, never a generated default.
pub fn generate(seed: u64) -> BackupSchedule {
    let mut rng = StdRng::seed_from_u64(seed);

    // Draw order is fixed: primary minute, secondary hour, secondary minute.
    let primary_minute = rng.gen_range(0..60u8);
    let secondary_hour = rng.gen_range(0..24u8);
    let secondary_minute = rng.gen_range(0..60u8);

    BackupSchedule {
        primary: TierSchedule {
            master: CronSlot::disabled(),
            slave: CronSlot::new(CronField::Every, CronField::At(primary_minute)),
        },
        secondary: TierSchedule {
            master: CronSlot::disabled(),
            slave: CronSlot::new(CronField::At(secondary_hour), CronField::At(secondary_minute)),
        },
    }
}
