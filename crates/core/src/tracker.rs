//! Daily project refresh: periodic re-tiering, day rollover and the
//! values the dashboard derives from elapsed time.
//!
//! `refresh` runs in a fixed order:
//!
//! 1. elapsed days since purchase,
//! 2. periodic re-check (growth-adjusted re-tier, at most once per boundary),
//! 3. daily reset of completion and photo state,
//! 4. days-left and weight-prompt derivation,
//! 5. today's schedule.
//!
//! Callers persist the returned project when [`RefreshOutcome::changed`] is
//! set. Two concurrent refreshes of the same project both read, derive and
//! write back without coordination; the later write wins. Both writes carry
//! the same derived values for the same day, so the race only loses task
//! updates that land between the read and the write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::animal::AnimalType;
use crate::feeding::feed_tier;
use crate::project::Project;
use crate::schedule::Schedule;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Default assumed cow weight gain between periodic checks (kg).
pub const DEFAULT_COW_GROWTH_KG: f64 = 30.0;

/// Default assumed goat weight gain between periodic checks (kg).
pub const DEFAULT_GOAT_GROWTH_KG: f64 = 0.0;

/// Weight added to the stored weight when re-tiering at a check boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecheckPolicy {
    pub cow_growth_kg: f64,
    pub goat_growth_kg: f64,
}

impl Default for RecheckPolicy {
    fn default() -> Self {
        Self {
            cow_growth_kg: DEFAULT_COW_GROWTH_KG,
            goat_growth_kg: DEFAULT_GOAT_GROWTH_KG,
        }
    }
}

impl RecheckPolicy {
    pub fn growth_allowance(&self, animal: &AnimalType) -> f64 {
        match animal {
            AnimalType::Cow => self.cow_growth_kg,
            AnimalType::Goat => self.goat_growth_kg,
            AnimalType::Other(_) => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayMeta {
    pub today: NaiveDate,
    pub elapsed_days: i64,
    pub days_left: i64,
    pub show_weight_prompt: bool,
}

/// A periodic re-check that fired during a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recheck {
    pub elapsed_days: i64,
    pub previous_tier: i32,
    pub new_tier: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub recheck: Option<Recheck>,
    pub day_reset: bool,
}

impl RefreshOutcome {
    /// Whether the project record was modified and needs saving.
    pub fn changed(&self) -> bool {
        self.recheck.is_some() || self.day_reset
    }
}

#[derive(Debug, Clone)]
pub struct Refresh {
    pub project: Project,
    pub schedule: Schedule,
    pub meta: DisplayMeta,
    pub outcome: RefreshOutcome,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct Tracker {
    policy: RecheckPolicy,
}

impl Tracker {
    pub fn new(policy: RecheckPolicy) -> Self {
        Self { policy }
    }

    pub fn refresh(&self, mut project: Project, today: NaiveDate) -> Refresh {
        let elapsed = elapsed_days(project.purchase_date, today);
        let period = project.check_period_days;
        let mut outcome = RefreshOutcome::default();

        if is_check_day(elapsed, period) && project.last_check_day != Some(elapsed) {
            let previous_tier = project.feed_tier;
            let adjusted = project.weight + self.policy.growth_allowance(&project.animal_type);
            project.feed_tier = feed_tier(adjusted, &project.animal_type);
            project.last_check_day = Some(elapsed);
            outcome.recheck = Some(Recheck {
                elapsed_days: elapsed,
                previous_tier,
                new_tier: project.feed_tier,
            });
        }

        outcome.day_reset = project.day.roll_to(today);

        let meta = DisplayMeta {
            today,
            elapsed_days: elapsed,
            days_left: days_left(elapsed, period),
            show_weight_prompt: is_check_day(elapsed, period) || project.animal_type.is_goat(),
        };

        let schedule = project.schedule(today);

        Refresh {
            project,
            schedule,
            meta,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// Elapsed-time helpers
// ---------------------------------------------------------------------------

/// Whole days from purchase to `today`; 0 on the purchase day.
pub fn elapsed_days(purchase_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - purchase_date).num_days()
}

/// Days until the next check boundary; 0 on a boundary day.
///
/// On the purchase day itself the first boundary is one full period away.
pub fn days_left(elapsed: i64, period: i32) -> i64 {
    let period = effective_period(period);
    if elapsed == 0 {
        return period;
    }
    (period - elapsed.rem_euclid(period)) % period
}

/// Whether `elapsed` sits on a check boundary other than the purchase day.
///
/// Boundaries repeat in both directions, so a future purchase date also
/// hits them (-30, -60, ...).
pub fn is_check_day(elapsed: i64, period: i32) -> bool {
    elapsed != 0 && elapsed.rem_euclid(effective_period(period)) == 0
}

/// Malformed periods (zero or negative) behave as a daily check.
fn effective_period(period: i32) -> i64 {
    i64::from(period.max(1))
}
