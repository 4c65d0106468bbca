//! # Node Platform Collaborator
//!
//! Device-side effects the statistics core needs but does not own: the
//! wall clock, a visible alert indication, and the ability to restart the
//! process. Identity is deliberately *not* on this trait: the device's
//! [`crate::state::NodeId`] is an explicit value handed to the engine, never
//! read from ambient state.

use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock, alert, and restart effects of the hosting device.
pub trait NodePlatform {
    /// Current wall-clock time as unix seconds.
    fn unix_time(&self) -> u32;

    /// Flash a visible indication that persisted state was reset (the field
    /// units blink their status LED for a few seconds).
    fn alert(&self);

    /// Restart the hosting process/firmware. Only called by
    /// [`crate::tide_stats::TideStats::hard_reset`].
    fn restart(&self);
}

/// Real platform: std clock; `restart` exits the process so the service
/// supervisor relaunches it.
pub struct SystemPlatform;

impl NodePlatform for SystemPlatform {
    fn unix_time(&self) -> u32 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as u32,
            Err(_) => 0, // pre-1970 clock; segmentation treats 0 like a reset
        }
    }

    fn alert(&self) {
        warn!("station state was reset; check provisioning");
    }

    fn restart(&self) {
        info!("hard reset requested, exiting for supervisor relaunch");
        std::process::exit(0);
    }
}

/// Scriptable platform for harnesses and replay: the clock is set by the
/// caller and alert/restart invocations are counted instead of acted on.
#[derive(Default)]
pub struct ManualPlatform {
    now: std::cell::Cell<u32>,
    alerts: std::cell::Cell<u32>,
    restarts: std::cell::Cell<u32>,
}

impl ManualPlatform {
    pub fn new(now: u32) -> Self {
        ManualPlatform {
            now: std::cell::Cell::new(now),
            ..Default::default()
        }
    }

    /// Move the clock to an absolute time.
    pub fn set_time(&self, now: u32) {
        self.now.set(now);
    }

    /// Advance the clock by `secs`.
    pub fn advance(&self, secs: u32) {
        self.now.set(self.now.get().wrapping_add(secs));
    }

    pub fn alert_count(&self) -> u32 {
        self.alerts.get()
    }

    pub fn restart_count(&self) -> u32 {
        self.restarts.get()
    }
}

impl NodePlatform for ManualPlatform {
    fn unix_time(&self) -> u32 {
        self.now.get()
    }

    fn alert(&self) {
        self.alerts.set(self.alerts.get() + 1);
    }

    fn restart(&self) {
        self.restarts.set(self.restarts.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_platform_clock_is_scriptable() {
        let platform = ManualPlatform::new(1_000);
        assert_eq!(platform.unix_time(), 1_000);
        platform.advance(500);
        assert_eq!(platform.unix_time(), 1_500);
        platform.set_time(42);
        assert_eq!(platform.unix_time(), 42);
    }

    #[test]
    fn manual_platform_counts_effects() {
        let platform = ManualPlatform::default();
        platform.alert();
        platform.alert();
        platform.restart();
        assert_eq!(platform.alert_count(), 2);
        assert_eq!(platform.restart_count(), 1);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemPlatform.unix_time() > 1_577_836_800);
    }
}
