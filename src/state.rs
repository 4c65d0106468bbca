//! # Persisted Station Entities
//!
//! Value types for everything the station keeps in non-volatile storage:
//! the device-binding state record, the calibration progress counters, and
//! the all-time high/low watermark. Each type here is a plain in-memory
//! value; its byte layout lives in [`crate::codec`] and its slot assignment
//! in [`crate::store`].

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable 16-byte identifier of one physical device.
///
/// Persisted state is only trusted if the stored owner id matches the id of
/// the device reading it; anything else (first boot, swapped board, reflashed
/// storage) triggers a full state reset.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub [u8; 16]);

/// Error returned when a host-supplied node id string cannot be parsed.
#[derive(Error, Debug)]
pub enum NodeIdParseError {
    #[error("node id must be 32 hex characters, got {0}")]
    BadLength(usize),
    #[error("node id contains a non-hex character: {0:?}")]
    BadCharacter(char),
}

impl NodeId {
    /// The "never initialized" sentinel: all bits set, which is exactly what
    /// erased FRAM reads back. A fresh store therefore self-reports as
    /// unowned without any extra bookkeeping.
    pub const BLANK: NodeId = NodeId([0xFF; 16]);

    /// True if this id is the erased-storage sentinel.
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl FromStr for NodeId {
    type Err = NodeIdParseError;

    /// Parse a 32-character hex string (the form device platforms hand out).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(NodeIdParseError::BadLength(s.len()));
        }
        let hex = |b: u8| -> Result<u8, NodeIdParseError> {
            (b as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or(NodeIdParseError::BadCharacter(b as char))
        };
        let raw = s.as_bytes();
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = hex(raw[2 * i])? << 4 | hex(raw[2 * i + 1])?;
        }
        Ok(NodeId(bytes))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}

/// Operating mode of the station firmware.
///
/// The core only ever *sets* this to [`OperatingMode::GpsFix`] (after a
/// reset); the other values are written by host workflows and carried here
/// so they survive power cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Waiting, nothing scheduled.
    Idle,
    /// Acquiring a GPS fix (the post-reset default).
    #[default]
    GpsFix,
    /// Geodetic calibration in progress.
    Calibrate,
    /// Normal measurement operation.
    Run,
    /// Unrecoverable condition flagged by the host.
    Error,
}

impl OperatingMode {
    /// Persisted byte value.
    pub(crate) fn as_byte(self) -> u8 {
        match self {
            OperatingMode::Idle => 0,
            OperatingMode::GpsFix => 1,
            OperatingMode::Calibrate => 2,
            OperatingMode::Run => 3,
            OperatingMode::Error => 4,
        }
    }

    /// Decode a persisted byte. An unknown value decodes to
    /// [`OperatingMode::Error`] so corruption shows up in reports instead of
    /// masquerading as a valid mode.
    pub(crate) fn from_byte(byte: u8) -> Self {
        match byte {
            0 => OperatingMode::Idle,
            1 => OperatingMode::GpsFix,
            2 => OperatingMode::Calibrate,
            3 => OperatingMode::Run,
            _ => OperatingMode::Error,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatingMode::Idle => "idle",
            OperatingMode::GpsFix => "gps-fix",
            OperatingMode::Calibrate => "calibrate",
            OperatingMode::Run => "run",
            OperatingMode::Error => "error",
        };
        f.write_str(name)
    }
}

/// Which flavor of sensor produced the distance stream.
///
/// A downward-looking range sensor reports negative `distance_up` values, a
/// submerged pressure/depth sensor positive ones; the statistics arithmetic
/// is identical either way, so this is informational state for the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    #[default]
    Unknown,
    /// Ultrasonic/radar range from above the water (negative readings).
    Range,
    /// Submerged pressure or depth sensor (positive readings).
    PressureDepth,
}

impl SensorKind {
    pub(crate) fn as_byte(self) -> u8 {
        match self {
            SensorKind::Unknown => 0,
            SensorKind::Range => 1,
            SensorKind::PressureDepth => 2,
        }
    }

    /// Unknown bytes decode to `Unknown` (visible in the report).
    pub(crate) fn from_byte(byte: u8) -> Self {
        match byte {
            1 => SensorKind::Range,
            2 => SensorKind::PressureDepth,
            _ => SensorKind::Unknown,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorKind::Unknown => "unknown",
            SensorKind::Range => "range",
            SensorKind::PressureDepth => "pressure-depth",
        };
        f.write_str(name)
    }
}

/// Device-binding state record: who owns the persisted data, what mode the
/// station is in, and the host-provisioned geodetic/tidal constants.
///
/// `owner` is the load-bearing field; a mismatch against the running
/// device's id invalidates every other persisted entity (see
/// [`crate::tide_stats::TideStats::initialize`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceState {
    /// Identity of the device this state belongs to.
    pub owner: NodeId,
    pub mode: OperatingMode,
    pub sensor_kind: SensorKind,
    /// Geodetic latitude in degrees, set by the host GPS workflow.
    pub lat: f32,
    /// Geodetic longitude in degrees.
    pub lon: f32,
    /// Tidal amplitude constant (A), set by the host calibration workflow.
    pub tidal_amplitude: f32,
    /// Tidal phase constant (k).
    pub tidal_phase: f32,
    /// Unix time of the last ingested reading, in seconds. Drives the
    /// gap detection of the period segmenter.
    pub last_reading_time: u32,
}

impl Default for DeviceState {
    /// The post-reset state: blank owner, GPS-acquire mode, everything else
    /// zeroed. `initialize` stamps the real owner after a mismatch reset.
    fn default() -> Self {
        DeviceState {
            owner: NodeId::BLANK,
            mode: OperatingMode::GpsFix,
            sensor_kind: SensorKind::Unknown,
            lat: 0.0,
            lon: 0.0,
            tidal_amplitude: 0.0,
            tidal_phase: 0.0,
            last_reading_time: 0,
        }
    }
}

/// Calibration progress: enough readings over enough elapsed time make the
/// geodetic offset trustworthy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationState {
    /// Readings accumulated in the current calibration run.
    pub num_readings: u32,
    /// Seconds of coverage accumulated across those readings.
    pub total_duration_sec: u32,
    /// True once both minimums in [`crate::config::Timing`] are met.
    pub calibrated: bool,
}

/// All-time high/low water watermark, independent of the period logic.
///
/// Both timestamps zero means "never recorded"; the first reading seeds both
/// sides. The empty state is encoded in the *times*, not the levels, so a
/// legitimate 0.0 reading (or the negative levels of a range sensor) is
/// never mistaken for emptiness.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ExtremeRecord {
    /// Highest water level ever observed.
    pub high: f32,
    /// Unix time of the high watermark, seconds.
    pub high_time: u32,
    /// Lowest water level ever observed.
    pub low: f32,
    /// Unix time of the low watermark, seconds.
    pub low_time: u32,
}

impl ExtremeRecord {
    /// True if no reading has ever been recorded.
    pub fn is_empty(&self) -> bool {
        self.high_time == 0 && self.low_time == 0
    }

    /// Fold one reading into the watermark. Seeds both sides when empty,
    /// otherwise widens whichever bound the reading exceeds.
    pub fn observe(&mut self, distance_up: f32, reading_time: u32) {
        if self.is_empty() {
            self.high = distance_up;
            self.high_time = reading_time;
            self.low = distance_up;
            self.low_time = reading_time;
            return;
        }
        if distance_up > self.high {
            self.high = distance_up;
            self.high_time = reading_time;
        }
        if distance_up < self.low {
            self.low = distance_up;
            self.low_time = reading_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trips_through_hex() {
        let id: NodeId = "00112233445566778899aabbccddeeff".parse().unwrap();
        assert_eq!(id.to_string(), "00112233445566778899aabbccddeeff");
        assert!(!id.is_blank());
    }

    #[test]
    fn node_id_rejects_bad_input() {
        assert!(matches!(
            "abcd".parse::<NodeId>(),
            Err(NodeIdParseError::BadLength(4))
        ));
        assert!(matches!(
            "zz112233445566778899aabbccddeeff".parse::<NodeId>(),
            Err(NodeIdParseError::BadCharacter('z'))
        ));
    }

    #[test]
    fn blank_sentinel_is_all_ones() {
        assert!(NodeId([0xFF; 16]).is_blank());
        assert_eq!(
            "ffffffffffffffffffffffffffffffff".parse::<NodeId>().unwrap(),
            NodeId::BLANK
        );
    }

    #[test]
    fn unknown_mode_byte_decodes_to_error() {
        assert_eq!(OperatingMode::from_byte(200), OperatingMode::Error);
        assert_eq!(SensorKind::from_byte(200), SensorKind::Unknown);
    }

    #[test]
    fn mode_bytes_round_trip() {
        for mode in [
            OperatingMode::Idle,
            OperatingMode::GpsFix,
            OperatingMode::Calibrate,
            OperatingMode::Run,
            OperatingMode::Error,
        ] {
            assert_eq!(OperatingMode::from_byte(mode.as_byte()), mode);
        }
    }

    /// The first observation seeds both sides of the watermark, even when
    /// the level is negative (range sensor) or exactly zero.
    #[test]
    fn extreme_record_seeds_from_first_reading() {
        let mut record = ExtremeRecord::default();
        assert!(record.is_empty());

        record.observe(-2.5, 1_600_000_000);
        assert!(!record.is_empty());
        assert_eq!(record.high, -2.5);
        assert_eq!(record.low, -2.5);
        assert_eq!(record.high_time, 1_600_000_000);
        assert_eq!(record.low_time, 1_600_000_000);
    }

    /// The watermark only widens; interior readings leave it untouched.
    #[test]
    fn extreme_record_only_widens() {
        let mut record = ExtremeRecord::default();
        record.observe(1.0, 100);
        record.observe(3.0, 200);
        record.observe(-1.0, 300);
        record.observe(2.0, 400); // interior, no change

        assert_eq!(record.high, 3.0);
        assert_eq!(record.high_time, 200);
        assert_eq!(record.low, -1.0);
        assert_eq!(record.low_time, 300);
    }
}
