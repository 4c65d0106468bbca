//! # Tidal Period Segmentation
//!
//! Classifies an unbounded stream of timestamped water-level readings into
//! discrete tidal periods (~25 hours in production, long enough to span both
//! low tides of a mixed semidiurnal cycle) and tracks the low and high
//! extremum of the period in progress. When a period closes, the engine
//! feeds the extrema into the long-run MLLW/MHHW accumulators.
//!
//! The transition logic is a pure step function over the persisted
//! [`PeriodDatum`] plus one volatile flag; persistence and accumulator
//! updates stay at the engine boundary.

use crate::config::Timing;
use log::debug;

/// The in-progress tidal period, persisted across power cycles.
///
/// Invariant while a period is open: `running_low` bounds every reading
/// seen since `start_time` from below and `running_high` from above. A
/// `start_time` of zero means no
/// period has ever started (post-reset state).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeriodDatum {
    /// Unix time the period was anchored, seconds. Zero = never started.
    pub start_time: u32,
    /// Lowest reading seen in this period.
    pub running_low: f32,
    /// Highest reading seen in this period.
    pub running_high: f32,
}

/// What one reading did to the period state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PeriodEvent {
    /// A new period was anchored at this reading (first ever, post-close,
    /// or forced by a sampling gap).
    Started,
    /// The reading fell inside the open period; extrema were updated.
    InPeriod,
    /// The period closed. `low`/`high` are its extrema, ready for the
    /// MLLW/MHHW accumulators. The next period is anchored at this
    /// reading's time but its extrema seed on the *next* reading.
    Closed { low: f32, high: f32 },
}

/// Period state machine: the persisted datum plus the volatile
/// "previous reading closed a period" flag.
///
/// The flag is deliberately not persisted. After a power cycle it resets to
/// false, so a period interrupted mid-flight simply continues if the next
/// reading arrives within the gap threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeriodTracker {
    pub datum: PeriodDatum,
    period_end: bool,
}

impl PeriodTracker {
    /// Resume tracking from a persisted datum (power-up path).
    pub fn from_datum(datum: PeriodDatum) -> Self {
        PeriodTracker {
            datum,
            period_end: false,
        }
    }

    /// Drop back to the never-started state.
    pub fn reset(&mut self) {
        *self = PeriodTracker::default();
    }

    /// Feed one reading through the transition rules, in order:
    ///
    /// 1. (Re)start a period if none has ever started, the previous reading
    ///    closed one, or the gap since the last *global* reading exceeds
    ///    `timing.datum_max_gap_s`.
    /// 2. Continue the open period while elapsed time is strictly below
    ///    `timing.datum_period_s`, folding the reading into the extrema.
    /// 3. Otherwise close the period, reporting its extrema, and anchor the
    ///    next period at this reading's time.
    ///
    /// Time arithmetic wraps: a clock regression reads as an enormous gap
    /// and lands in rule 1 instead of corrupting a live period.
    ///
    /// `last_reading_time` is the time of the previous reading across *all*
    /// periods (the persisted `DeviceState` field), not this period's start.
    pub fn observe(
        &mut self,
        distance_up: f32,
        reading_time: u32,
        last_reading_time: u32,
        timing: &Timing,
    ) -> PeriodEvent {
        let gap = reading_time.wrapping_sub(last_reading_time);

        if self.datum.start_time == 0 || self.period_end || gap > timing.datum_max_gap_s {
            debug!("period start at t={reading_time}");
            self.datum.running_low = distance_up;
            self.datum.running_high = distance_up;
            self.datum.start_time = reading_time;
            self.period_end = false;
            return PeriodEvent::Started;
        }

        let elapsed = reading_time.wrapping_sub(self.datum.start_time);
        if elapsed < timing.datum_period_s {
            debug!(
                "{elapsed}s of {}s period: level {distance_up} (low {}, high {})",
                timing.datum_period_s, self.datum.running_low, self.datum.running_high
            );
            self.datum.running_low = self.datum.running_low.min(distance_up);
            self.datum.running_high = self.datum.running_high.max(distance_up);
            return PeriodEvent::InPeriod;
        }

        let (low, high) = (self.datum.running_low, self.datum.running_high);
        debug!("period end at t={reading_time}: low {low}, high {high}");
        self.period_end = true;
        // The closing reading only anchors the new period's start time; the
        // extrema seed on the next reading via rule 1 (long-standing station
        // behavior, kept as-is).
        self.datum.start_time = reading_time;
        PeriodEvent::Closed { low, high }
    }
}
