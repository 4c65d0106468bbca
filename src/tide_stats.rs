//! # Tidal Statistics Engine
//!
//! The engine owns every persisted entity, runs readings through the period
//! segmenter, and keeps the backing store current: each mutating call runs
//! to completion (classify, mutate in memory, then write every slot back)
//! before returning, so power can drop at any instruction boundary without
//! losing more than the call in flight.
//!
//! The store is the system of record; the in-memory copies here are a cache
//! reloaded at initialization and on every statistics query. There is no
//! internal locking: the engine is built for exclusive ownership by one
//! call site per physical device, and a multi-threaded host must wrap it in
//! its own mutual exclusion.

use crate::config::Timing;
use crate::datum::{PeriodEvent, PeriodTracker};
use crate::node::NodePlatform;
use crate::state::{
    CalibrationState, DeviceState, ExtremeRecord, NodeId, OperatingMode, SensorKind,
};
use crate::stats::RunningStat;
use crate::store::{Slot, SlotStore, StoreError};
use log::{info, warn};
use serde::Serialize;

/// Persistent tidal statistics for one station.
///
/// Generic over the storage medium and the device platform, following the
/// same seam the field units use to swap real FRAM for a host file. The
/// device identity is an explicit constructor argument, never read from
/// ambient state.
pub struct TideStats<S: SlotStore, P: NodePlatform> {
    store: S,
    platform: P,
    node_id: NodeId,
    timing: Timing,

    state: DeviceState,
    calib_dist: RunningStat,
    calib: CalibrationState,
    mllw: RunningStat,
    mhhw: RunningStat,
    msl: RunningStat,
    tracker: PeriodTracker,
    record: ExtremeRecord,
}

impl<S: SlotStore, P: NodePlatform> TideStats<S, P> {
    /// Bind an engine to a store and platform. Nothing is read or written
    /// until [`TideStats::initialize`] runs.
    pub fn new(store: S, platform: P, node_id: NodeId, timing: Timing) -> Self {
        TideStats {
            store,
            platform,
            node_id,
            timing,
            state: DeviceState::default(),
            calib_dist: RunningStat::new(),
            calib: CalibrationState::default(),
            mllw: RunningStat::new(),
            mhhw: RunningStat::new(),
            msl: RunningStat::new(),
            tracker: PeriodTracker::default(),
            record: ExtremeRecord::default(),
        }
    }

    /// Load persisted state and run the ownership guard.
    ///
    /// If the persisted owner differs from this device's id (including the
    /// blank sentinel an erased store reads back), the persisted state
    /// belongs to nobody we trust: raise the platform alert, zero every
    /// entity, stamp this device's identity, and flush. The mismatch is
    /// handled, never surfaced as a failure.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        self.load_all()?;

        if self.state.owner != self.node_id {
            warn!(
                "persisted owner {} does not match node {}; resetting all state",
                self.state.owner, self.node_id
            );
            self.platform.alert();
            self.clear()?;
            self.state.owner = self.node_id;
            self.save_all()?;
        }
        info!("station {} initialized", self.node_id);
        Ok(())
    }

    /// Ingest one water-level reading, timestamped from the platform clock.
    ///
    /// `distance_up` is displacement with upward positive: depth sensors
    /// report positive values, downward-looking range sensors negative
    /// ones, and the statistics are identical either way.
    pub fn push_reading(&mut self, distance_up: f64) -> Result<(), StoreError> {
        let reading_time = self.platform.unix_time();
        self.push_reading_at(distance_up, reading_time)
    }

    /// Ingest one reading with a caller-supplied timestamp (unix seconds).
    /// Same segmentation logic as [`TideStats::push_reading`].
    pub fn push_reading_at(
        &mut self,
        distance_up: f64,
        reading_time: u32,
    ) -> Result<(), StoreError> {
        // every reading counts toward mean sea level, period or not
        self.msl.push(distance_up);

        let event = self.tracker.observe(
            distance_up as f32,
            reading_time,
            self.state.last_reading_time,
            &self.timing,
        );
        if let PeriodEvent::Closed { low, high } = event {
            self.mllw.push(f64::from(low));
            self.mhhw.push(f64::from(high));
        }

        self.record.observe(distance_up as f32, reading_time);
        self.state.last_reading_time = reading_time;
        self.save_all()
    }

    /// Ingest one calibration-mode reading, timestamped from the platform
    /// clock. See [`TideStats::push_calibration_reading_at`].
    pub fn push_calibration_reading(&mut self, distance_up: f64) -> Result<(), StoreError> {
        let reading_time = self.platform.unix_time();
        self.push_calibration_reading_at(distance_up, reading_time)
    }

    /// Ingest one calibration-mode reading with an explicit timestamp.
    ///
    /// Calibration trusts the geodetic offset once enough readings span
    /// enough elapsed time. A gap beyond the threshold restarts the run
    /// from scratch (counters and distance accumulator zeroed, trusted
    /// flag dropped); otherwise the gap adds to the accumulated coverage.
    pub fn push_calibration_reading_at(
        &mut self,
        distance_up: f64,
        reading_time: u32,
    ) -> Result<(), StoreError> {
        let gap = reading_time.wrapping_sub(self.state.last_reading_time);
        if gap > self.timing.max_calibration_gap_s {
            if self.calib.num_readings > 0 {
                warn!("calibration gap of {gap}s; restarting calibration run");
            }
            self.calib = CalibrationState::default();
            self.calib_dist.reset();
        } else {
            self.calib.total_duration_sec += gap;
        }

        self.calib.num_readings += 1;
        self.calib_dist.push(distance_up);
        self.calib.calibrated = self.calib.num_readings >= self.timing.min_calibration_readings
            && self.calib.total_duration_sec >= self.timing.min_calibration_duration_s;

        self.state.last_reading_time = reading_time;
        self.save_all()
    }

    /// True once the current calibration run meets both minimums.
    pub fn is_calibrated(&self) -> bool {
        self.calib.calibrated
    }

    /// Mean lower-low water: long-run mean of each period's low extremum.
    /// Reloads from the store before returning.
    pub fn mllw(&mut self) -> Result<f64, StoreError> {
        self.mllw = self.store.load(Slot::Mllw)?;
        Ok(self.mllw.mean())
    }

    /// Mean higher-high water: long-run mean of each period's high extremum.
    pub fn mhhw(&mut self) -> Result<f64, StoreError> {
        self.mhhw = self.store.load(Slot::Mhhw)?;
        Ok(self.mhhw.mean())
    }

    /// Mean sea level: long-run mean of every reading.
    pub fn msl(&mut self) -> Result<f64, StoreError> {
        self.msl = self.store.load(Slot::Msl)?;
        Ok(self.msl.mean())
    }

    /// Mean distance accumulated by the calibration workflow.
    pub fn calibration_distance(&mut self) -> Result<f64, StoreError> {
        self.calib_dist = self.store.load(Slot::CalibDistance)?;
        Ok(self.calib_dist.mean())
    }

    pub fn standard_deviation_mllw(&mut self) -> Result<f64, StoreError> {
        self.mllw = self.store.load(Slot::Mllw)?;
        Ok(self.mllw.sample_std_dev())
    }

    pub fn standard_deviation_mhhw(&mut self) -> Result<f64, StoreError> {
        self.mhhw = self.store.load(Slot::Mhhw)?;
        Ok(self.mhhw.sample_std_dev())
    }

    pub fn standard_deviation_msl(&mut self) -> Result<f64, StoreError> {
        self.msl = self.store.load(Slot::Msl)?;
        Ok(self.msl.sample_std_dev())
    }

    /// Number of completed periods folded into MLLW.
    pub fn num_mllw_values(&mut self) -> Result<u32, StoreError> {
        self.mllw = self.store.load(Slot::Mllw)?;
        Ok(self.mllw.count())
    }

    /// Number of completed periods folded into MHHW.
    pub fn num_mhhw_values(&mut self) -> Result<u32, StoreError> {
        self.mhhw = self.store.load(Slot::Mhhw)?;
        Ok(self.mhhw.count())
    }

    /// Number of readings folded into MSL.
    pub fn num_msl_values(&mut self) -> Result<u32, StoreError> {
        self.msl = self.store.load(Slot::Msl)?;
        Ok(self.msl.count())
    }

    /// All-time high/low watermark.
    pub fn extreme_record(&mut self) -> Result<ExtremeRecord, StoreError> {
        self.record = self.store.load(Slot::ExtremeRecord)?;
        Ok(self.record)
    }

    /// Hours until the first MLLW value exists: the remainder of the first
    /// period, or 0 once MLLW has at least one value. Read-only diagnostic;
    /// goes negative when the first period close is overdue.
    pub fn mllw_calibration_hours_left(&mut self) -> Result<f32, StoreError> {
        self.mllw = self.store.load(Slot::Mllw)?;
        if self.mllw.count() > 0 {
            return Ok(0.0);
        }
        let now = self.platform.unix_time();
        let elapsed = now.wrapping_sub(self.tracker.datum.start_time);
        Ok((self.timing.datum_period_s as f32 - elapsed as f32) / 3600.0)
    }

    /// Zero every persisted entity and flush. The owner is set back to the
    /// blank sentinel; `initialize` stamps a real identity afterwards.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.state = DeviceState::default();
        self.calib_dist.reset();
        self.calib = CalibrationState::default();
        self.mllw.reset();
        self.mhhw.reset();
        self.msl.reset();
        self.tracker.reset();
        self.record = ExtremeRecord::default();
        self.save_all()
    }

    /// [`TideStats::clear`] plus a platform restart, for reprovisioning or
    /// recovery from corruption the ownership guard cannot catch.
    pub fn hard_reset(&mut self) -> Result<(), StoreError> {
        self.clear()?;
        self.platform.restart();
        Ok(())
    }

    pub fn mode(&self) -> OperatingMode {
        self.state.mode
    }

    /// Set the operating mode (host workflow state) and flush.
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), StoreError> {
        self.state.mode = mode;
        self.store.save(Slot::DeviceState, &self.state)
    }

    pub fn sensor_kind(&self) -> SensorKind {
        self.state.sensor_kind
    }

    pub fn set_sensor_kind(&mut self, kind: SensorKind) -> Result<(), StoreError> {
        self.state.sensor_kind = kind;
        self.store.save(Slot::DeviceState, &self.state)
    }

    /// Geodetic position as `(lat, lon)` degrees.
    pub fn location(&self) -> (f32, f32) {
        (self.state.lat, self.state.lon)
    }

    pub fn set_location(&mut self, lat: f32, lon: f32) -> Result<(), StoreError> {
        self.state.lat = lat;
        self.state.lon = lon;
        self.store.save(Slot::DeviceState, &self.state)
    }

    /// Tidal constants as `(A, k)`.
    pub fn tidal_constants(&self) -> (f32, f32) {
        (self.state.tidal_amplitude, self.state.tidal_phase)
    }

    pub fn set_tidal_constants(&mut self, amplitude: f32, phase: f32) -> Result<(), StoreError> {
        self.state.tidal_amplitude = amplitude;
        self.state.tidal_phase = phase;
        self.store.save(Slot::DeviceState, &self.state)
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The platform handle (harnesses drive the manual clock through this).
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// One reloaded snapshot of everything the station knows, for the host
    /// report surface (text or JSON).
    pub fn report(&mut self) -> Result<StationReport, StoreError> {
        self.load_all()?;
        let hours_left = self.mllw_calibration_hours_left()?;
        Ok(StationReport {
            node_id: self.node_id.to_string(),
            mode: self.state.mode,
            sensor_kind: self.state.sensor_kind,
            lat: self.state.lat,
            lon: self.state.lon,
            tidal_amplitude: self.state.tidal_amplitude,
            tidal_phase: self.state.tidal_phase,
            last_reading_time: self.state.last_reading_time,
            calibrated: self.calib.calibrated,
            calibration_readings: self.calib.num_readings,
            calibration_duration_s: self.calib.total_duration_sec,
            calibration_distance: self.calib_dist.mean(),
            msl: StatSummary::of(&self.msl),
            mllw: StatSummary::of(&self.mllw),
            mhhw: StatSummary::of(&self.mhhw),
            extreme: self.record,
            period_start_time: self.tracker.datum.start_time,
            mllw_calibration_hours_left: hours_left,
        })
    }

    fn load_all(&mut self) -> Result<(), StoreError> {
        self.state = self.store.load(Slot::DeviceState)?;
        self.calib_dist = self.store.load(Slot::CalibDistance)?;
        self.calib = self.store.load(Slot::Calibration)?;
        self.mllw = self.store.load(Slot::Mllw)?;
        self.mhhw = self.store.load(Slot::Mhhw)?;
        self.msl = self.store.load(Slot::Msl)?;
        self.record = self.store.load(Slot::ExtremeRecord)?;
        // only the anchor and extrema live in the store; the volatile close
        // flag stays as-is so a reload between a period close and the next
        // reading does not cancel the pending restart
        self.tracker.datum = self.store.load(Slot::PeriodDatum)?;
        Ok(())
    }

    /// Flush every entity, slot by slot in layout order. Slots are
    /// individually atomic but there is no cross-slot transaction; a crash
    /// between two writes leaves slots from different instants, each still
    /// independently reconstructible from future readings.
    fn save_all(&mut self) -> Result<(), StoreError> {
        self.store.save(Slot::DeviceState, &self.state)?;
        self.store.save(Slot::CalibDistance, &self.calib_dist)?;
        self.store.save(Slot::Calibration, &self.calib)?;
        self.store.save(Slot::Mllw, &self.mllw)?;
        self.store.save(Slot::Mhhw, &self.mhhw)?;
        self.store.save(Slot::Msl, &self.msl)?;
        self.store.save(Slot::ExtremeRecord, &self.record)?;
        self.store.save(Slot::PeriodDatum, &self.tracker.datum)
    }
}

/// User-visible summary of one accumulator.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatSummary {
    pub count: u32,
    pub mean: f64,
    pub std_dev: f64,
}

impl StatSummary {
    fn of(stat: &RunningStat) -> Self {
        StatSummary {
            count: stat.count(),
            mean: stat.mean(),
            std_dev: stat.sample_std_dev(),
        }
    }
}

/// Serializable snapshot of every persisted entity's user-visible state.
#[derive(Clone, Debug, Serialize)]
pub struct StationReport {
    pub node_id: String,
    pub mode: OperatingMode,
    pub sensor_kind: SensorKind,
    pub lat: f32,
    pub lon: f32,
    pub tidal_amplitude: f32,
    pub tidal_phase: f32,
    pub last_reading_time: u32,
    pub calibrated: bool,
    pub calibration_readings: u32,
    pub calibration_duration_s: u32,
    pub calibration_distance: f64,
    pub msl: StatSummary,
    pub mllw: StatSummary,
    pub mhhw: StatSummary,
    pub extreme: ExtremeRecord,
    pub period_start_time: u32,
    pub mllw_calibration_hours_left: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ManualPlatform;
    use crate::store::MemoryStore;

    const BASE: u32 = 1_600_000_000;

    fn node_id() -> NodeId {
        "00112233445566778899aabbccddeeff".parse().unwrap()
    }

    /// Debug-scale periods with a gap tolerance spanning the whole period,
    /// so scenario spacing exercises the period rules rather than the gap
    /// restart.
    fn timing() -> Timing {
        Timing {
            datum_max_gap_s: 300,
            ..Timing::cal_debug()
        }
    }

    fn fresh_engine() -> TideStats<MemoryStore, ManualPlatform> {
        let mut engine = TideStats::new(
            MemoryStore::new(),
            ManualPlatform::new(BASE),
            node_id(),
            timing(),
        );
        engine.initialize().unwrap();
        engine
    }

    /// First boot over an erased store: the blank owner fails the guard,
    /// the platform alert fires, and the real identity is stamped.
    #[test]
    fn first_boot_resets_and_stamps_identity() {
        let mut engine = fresh_engine();
        assert_eq!(engine.platform().alert_count(), 1);
        assert_eq!(engine.num_msl_values().unwrap(), 0);

        // the stamped identity survives into a second engine without a reset
        let store = engine.store;
        let mut second = TideStats::new(
            store,
            ManualPlatform::new(BASE),
            node_id(),
            timing(),
        );
        second.initialize().unwrap();
        assert_eq!(second.platform().alert_count(), 0);
    }

    /// A different device id over the same store wipes everything and
    /// takes ownership.
    #[test]
    fn foreign_owner_triggers_full_reset() {
        let mut engine = fresh_engine();
        for x in [1.0, 2.0, 3.0] {
            engine.push_reading_at(x, BASE).unwrap();
        }
        assert_eq!(engine.num_msl_values().unwrap(), 3);

        let other: NodeId = "ffeeddccbbaa99887766554433221100".parse().unwrap();
        let mut replaced = TideStats::new(
            engine.store,
            ManualPlatform::new(BASE),
            other,
            timing(),
        );
        replaced.initialize().unwrap();

        assert_eq!(replaced.platform().alert_count(), 1);
        assert_eq!(replaced.num_msl_values().unwrap(), 0);
        assert_eq!(replaced.mllw().unwrap(), 0.0);
        assert!(!replaced.is_calibrated());

        // and the new owner is now persisted
        let mut third = TideStats::new(
            replaced.store,
            ManualPlatform::new(BASE),
            other,
            timing(),
        );
        third.initialize().unwrap();
        assert_eq!(third.platform().alert_count(), 0);
    }

    /// Three same-instant readings land only in MSL: mean 2, std dev 1.
    #[test]
    fn msl_tracks_every_reading() {
        let mut engine = fresh_engine();
        for x in [1.0, 2.0, 3.0] {
            engine.push_reading_at(x, BASE).unwrap();
        }
        assert_eq!(engine.msl().unwrap(), 2.0);
        assert_eq!(engine.num_msl_values().unwrap(), 3);
        assert_eq!(engine.standard_deviation_msl().unwrap(), 1.0);
        assert_eq!(engine.num_mllw_values().unwrap(), 0);
    }

    /// One full period pushes its extrema into MLLW/MHHW exactly once.
    #[test]
    fn completed_period_feeds_datum_accumulators() {
        let mut engine = fresh_engine();
        let period = engine.timing().datum_period_s;

        engine.push_reading_at(5.0, BASE).unwrap();
        engine.push_reading_at(1.0, BASE + period / 2).unwrap();
        engine.push_reading_at(3.0, BASE + period + 1).unwrap();

        assert_eq!(engine.num_mllw_values().unwrap(), 1);
        assert_eq!(engine.mllw().unwrap(), 1.0);
        assert_eq!(engine.mhhw().unwrap(), 5.0);
    }

    /// Statistics survive a power cycle: a second engine over the same
    /// store picks up where the first stopped, mid-period included.
    #[test]
    fn power_cycle_resumes_from_store() {
        let mut engine = fresh_engine();
        let period = engine.timing().datum_period_s;
        engine.push_reading_at(5.0, BASE).unwrap();
        engine.push_reading_at(1.0, BASE + 60).unwrap();

        let mut resumed = TideStats::new(
            engine.store,
            ManualPlatform::new(BASE + 120),
            node_id(),
            timing(),
        );
        resumed.initialize().unwrap();
        assert_eq!(resumed.platform().alert_count(), 0);
        assert_eq!(resumed.num_msl_values().unwrap(), 2);

        // within the gap threshold the old period keeps running and closes
        // on schedule with extrema from both sides of the power cycle
        resumed.push_reading_at(7.0, BASE + 120).unwrap();
        resumed.push_reading_at(3.0, BASE + period + 1).unwrap();
        assert_eq!(resumed.mllw().unwrap(), 1.0);
        assert_eq!(resumed.mhhw().unwrap(), 7.0);
    }

    /// clear() zeroes every entity and drops ownership.
    #[test]
    fn clear_zeroes_everything() {
        let mut engine = fresh_engine();
        engine.push_reading_at(4.0, BASE).unwrap();
        engine.push_calibration_reading_at(4.0, BASE + 10).unwrap();
        engine.set_location(43.6, -70.2).unwrap();

        engine.clear().unwrap();

        assert_eq!(engine.num_msl_values().unwrap(), 0);
        assert_eq!(engine.mllw().unwrap(), 0.0);
        assert_eq!(engine.mhhw().unwrap(), 0.0);
        assert_eq!(engine.msl().unwrap(), 0.0);
        assert!(!engine.is_calibrated());
        assert_eq!(engine.location(), (0.0, 0.0));
        assert!(engine.extreme_record().unwrap().is_empty());
    }

    /// hard_reset() clears and then requests a platform restart.
    #[test]
    fn hard_reset_requests_restart() {
        let mut engine = fresh_engine();
        engine.push_reading_at(4.0, BASE).unwrap();
        engine.hard_reset().unwrap();
        assert_eq!(engine.platform().restart_count(), 1);
        assert_eq!(engine.num_msl_values().unwrap(), 0);
    }

    /// Calibration flips to trusted once both minimums are met, and a gap
    /// beyond the threshold restarts the run.
    #[test]
    fn calibration_run_and_gap_restart() {
        let mut engine = fresh_engine();
        let timing = *engine.timing(); // cal_debug: 3 readings over 180 s

        engine.push_calibration_reading_at(2.0, BASE).unwrap();
        engine
            .push_calibration_reading_at(2.1, BASE + 100)
            .unwrap();
        assert!(!engine.is_calibrated());
        engine
            .push_calibration_reading_at(1.9, BASE + 200)
            .unwrap();
        assert!(engine.is_calibrated());
        assert!((engine.calibration_distance().unwrap() - 2.0).abs() < 1e-9);

        // a gap over max_calibration_gap_s drops everything
        let late = BASE + 200 + timing.max_calibration_gap_s + 1;
        engine.push_calibration_reading_at(2.0, late).unwrap();
        assert!(!engine.is_calibrated());
        assert_eq!(engine.calibration_distance().unwrap(), 2.0);
    }

    /// The countdown reports the remainder of the first period and drops
    /// to zero once MLLW exists.
    #[test]
    fn mllw_countdown_follows_first_period() {
        let mut engine = fresh_engine();
        let period = engine.timing().datum_period_s;

        engine.push_reading_at(2.0, BASE).unwrap();
        engine.platform().set_time(BASE + period / 2);
        let left = engine.mllw_calibration_hours_left().unwrap();
        assert!((left - (period as f32 / 2.0) / 3600.0).abs() < 1e-4);

        engine.push_reading_at(1.0, BASE + period / 2).unwrap();
        engine.push_reading_at(3.0, BASE + period + 1).unwrap();
        assert_eq!(engine.mllw_calibration_hours_left().unwrap(), 0.0);
    }

    /// The countdown answers from the store, like every other statistics
    /// query, not from a stale in-memory copy.
    #[test]
    fn mllw_countdown_reads_persisted_count() {
        let mut engine = fresh_engine();
        engine.push_reading_at(2.0, BASE).unwrap();

        // an MLLW value written behind the engine's back still counts
        let mut persisted = RunningStat::new();
        persisted.push(1.0);
        engine.store.save(Slot::Mllw, &persisted).unwrap();

        assert_eq!(engine.mllw_calibration_hours_left().unwrap(), 0.0);
    }

    /// Host-facing persisted fields write through and reload.
    #[test]
    fn persisted_field_setters_flush() {
        let mut engine = fresh_engine();
        engine.set_mode(OperatingMode::Run).unwrap();
        engine.set_sensor_kind(SensorKind::Range).unwrap();
        engine.set_location(43.65, -70.25).unwrap();
        engine.set_tidal_constants(1.5, 0.3).unwrap();

        let mut reloaded = TideStats::new(
            engine.store,
            ManualPlatform::new(BASE),
            node_id(),
            timing(),
        );
        reloaded.initialize().unwrap();
        assert_eq!(reloaded.mode(), OperatingMode::Run);
        assert_eq!(reloaded.sensor_kind(), SensorKind::Range);
        assert_eq!(reloaded.location(), (43.65, -70.25));
        assert_eq!(reloaded.tidal_constants(), (1.5, 0.3));
    }

    /// The report snapshot reflects reloaded store contents.
    #[test]
    fn report_reflects_station_state() {
        let mut engine = fresh_engine();
        engine.push_reading_at(-2.0, BASE).unwrap();
        engine.push_reading_at(-1.0, BASE + 30).unwrap();

        let report = engine.report().unwrap();
        assert_eq!(report.node_id, node_id().to_string());
        assert_eq!(report.msl.count, 2);
        assert_eq!(report.msl.mean, -1.5);
        assert_eq!(report.extreme.high, -1.0);
        assert_eq!(report.extreme.low, -2.0);
        assert_eq!(report.last_reading_time, BASE + 30);
        assert!(!report.calibrated);
    }
}
