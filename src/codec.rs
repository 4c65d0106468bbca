//! # Fixed-Width Record Codecs
//!
//! Byte layouts for every persisted entity. FRAM hands back raw fixed-size
//! blocks, so each entity encodes to an explicit little-endian layout with
//! hand-placed offsets rather than a derived format; the layout is part of
//! the station's on-storage contract and must not drift between firmware
//! revisions.
//!
//! Decoding never fails: a slot is always exactly `SIZE` bytes (the store
//! enforces that), and unknown enum bytes decode to their visible fallback
//! values rather than erroring.

use crate::datum::PeriodDatum;
use crate::state::{CalibrationState, DeviceState, ExtremeRecord, NodeId, OperatingMode, SensorKind};
use crate::stats::RunningStat;

/// Fixed-width encode/decode for one persisted entity.
///
/// `encode_into` writes exactly `SIZE` bytes at the start of `buf`;
/// `decode` reads the same. Callers pass strictly `SIZE`-byte slices; the
/// store layer guarantees the sizing, so the codecs index unconditionally.
pub trait FramRecord: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Serialize into the first `SIZE` bytes of `buf`.
    fn encode_into(&self, buf: &mut [u8]);

    /// Deserialize from the first `SIZE` bytes of `buf`.
    fn decode(buf: &[u8]) -> Self;
}

fn read_f32(buf: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_f64(buf: &[u8], at: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    f64::from_le_bytes(bytes)
}

/// owner[16], mode u8, kind u8, lat f32, lon f32, A f32, k f32, last_reading_time u32
impl FramRecord for DeviceState {
    const SIZE: usize = 38;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..16].copy_from_slice(&self.owner.0);
        buf[16] = self.mode.as_byte();
        buf[17] = self.sensor_kind.as_byte();
        buf[18..22].copy_from_slice(&self.lat.to_le_bytes());
        buf[22..26].copy_from_slice(&self.lon.to_le_bytes());
        buf[26..30].copy_from_slice(&self.tidal_amplitude.to_le_bytes());
        buf[30..34].copy_from_slice(&self.tidal_phase.to_le_bytes());
        buf[34..38].copy_from_slice(&self.last_reading_time.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        let mut owner = [0u8; 16];
        owner.copy_from_slice(&buf[0..16]);
        DeviceState {
            owner: NodeId(owner),
            mode: OperatingMode::from_byte(buf[16]),
            sensor_kind: SensorKind::from_byte(buf[17]),
            lat: read_f32(buf, 18),
            lon: read_f32(buf, 22),
            tidal_amplitude: read_f32(buf, 26),
            tidal_phase: read_f32(buf, 30),
            last_reading_time: read_u32(buf, 34),
        }
    }
}

/// count u32, mean f64, sum_sq_dev f64
impl FramRecord for RunningStat {
    const SIZE: usize = 20;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.count().to_le_bytes());
        buf[4..12].copy_from_slice(&self.mean().to_le_bytes());
        buf[12..20].copy_from_slice(&self.sum_sq_dev().to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        RunningStat::from_raw(read_u32(buf, 0), read_f64(buf, 4), read_f64(buf, 12))
    }
}

/// num_readings u32, total_duration_sec u32, calibrated u8
impl FramRecord for CalibrationState {
    const SIZE: usize = 9;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.num_readings.to_le_bytes());
        buf[4..8].copy_from_slice(&self.total_duration_sec.to_le_bytes());
        buf[8] = u8::from(self.calibrated);
    }

    fn decode(buf: &[u8]) -> Self {
        CalibrationState {
            num_readings: read_u32(buf, 0),
            total_duration_sec: read_u32(buf, 4),
            // any nonzero byte counts as true (erased FRAM reads 0xFF)
            calibrated: buf[8] != 0,
        }
    }
}

/// high f32, high_time u32, low f32, low_time u32
impl FramRecord for ExtremeRecord {
    const SIZE: usize = 16;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.high.to_le_bytes());
        buf[4..8].copy_from_slice(&self.high_time.to_le_bytes());
        buf[8..12].copy_from_slice(&self.low.to_le_bytes());
        buf[12..16].copy_from_slice(&self.low_time.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        ExtremeRecord {
            high: read_f32(buf, 0),
            high_time: read_u32(buf, 4),
            low: read_f32(buf, 8),
            low_time: read_u32(buf, 12),
        }
    }
}

/// start_time u32, running_low f32, running_high f32
impl FramRecord for PeriodDatum {
    const SIZE: usize = 12;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.start_time.to_le_bytes());
        buf[4..8].copy_from_slice(&self.running_low.to_le_bytes());
        buf[8..12].copy_from_slice(&self.running_high.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        PeriodDatum {
            start_time: read_u32(buf, 0),
            running_low: read_f32(buf, 4),
            running_high: read_f32(buf, 8),
        }
    }
}
