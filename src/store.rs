//! # Slot-Addressed Persistent Store
//!
//! The persistence collaborator: eight independent fixed-size record slots,
//! read and written synchronously, each slot atomic at record granularity
//! (the FRAM hardware contract; a medium without that guarantee needs a
//! checksum layer in its adapter, not in this core).
//!
//! Two adapters ship with the crate: [`MemoryStore`], which mimics erased
//! FRAM (all bytes `0xFF`) and serves as the test double, and
//! [`FileStore`], a flat file with slot offsets for running the core on a
//! host. A real FRAM driver is a separate crate implementing [`SlotStore`]
//! over its bus.

use crate::codec::FramRecord;
use crate::datum::PeriodDatum;
use crate::state::{CalibrationState, DeviceState, ExtremeRecord};
use crate::stats::RunningStat;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use thiserror::Error;

/// Logical record slots, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    DeviceState,
    /// Distance accumulator for the calibration workflow.
    CalibDistance,
    Calibration,
    Mllw,
    Mhhw,
    Msl,
    ExtremeRecord,
    PeriodDatum,
}

impl Slot {
    /// Every slot, in storage order.
    pub const ALL: [Slot; 8] = [
        Slot::DeviceState,
        Slot::CalibDistance,
        Slot::Calibration,
        Slot::Mllw,
        Slot::Mhhw,
        Slot::Msl,
        Slot::ExtremeRecord,
        Slot::PeriodDatum,
    ];

    /// Record size of this slot in bytes.
    pub const fn size(self) -> usize {
        match self {
            Slot::DeviceState => DeviceState::SIZE,
            Slot::CalibDistance | Slot::Mllw | Slot::Mhhw | Slot::Msl => RunningStat::SIZE,
            Slot::Calibration => CalibrationState::SIZE,
            Slot::ExtremeRecord => ExtremeRecord::SIZE,
            Slot::PeriodDatum => PeriodDatum::SIZE,
        }
    }

    /// Byte offset of this slot in a flat layout (slots packed in order).
    pub fn offset(self) -> usize {
        Slot::ALL
            .iter()
            .take_while(|other| **other != self)
            .map(|other| other.size())
            .sum()
    }

    /// Total byte span of all slots in the flat layout.
    pub fn total_span() -> usize {
        Slot::ALL.iter().map(|slot| slot.size()).sum()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::DeviceState => "device-state",
            Slot::CalibDistance => "calib-distance",
            Slot::Calibration => "calibration",
            Slot::Mllw => "mllw",
            Slot::Mhhw => "mhhw",
            Slot::Msl => "msl",
            Slot::ExtremeRecord => "extreme-record",
            Slot::PeriodDatum => "period-datum",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by store adapters.
///
/// Every operation that touches the store propagates these; a completed
/// call means a durable write, never a silently dropped one.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium could not be opened or initialized.
    #[error("store open failed: {0}")]
    Open(#[source] io::Error),

    /// The underlying medium failed.
    #[error("store i/o failed on slot {slot}: {source}")]
    Io {
        slot: Slot,
        #[source]
        source: io::Error,
    },

    /// A caller buffer (or a persisted block) does not match the slot's
    /// fixed record size; a store-contract violation, not a data error.
    #[error("slot {slot} holds {expected} bytes, got {actual}")]
    SizeMismatch {
        slot: Slot,
        expected: usize,
        actual: usize,
    },
}

/// Synchronous slot-granular persistence.
///
/// `read` fills `buf` (which must be exactly `slot.size()` bytes) with the
/// record; `write` durably stores `bytes` (same sizing rule). The default
/// `load`/`save` methods bridge to the [`FramRecord`] codecs.
pub trait SlotStore {
    fn read(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), StoreError>;
    fn write(&mut self, slot: Slot, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read and decode one record.
    fn load<R: FramRecord>(&mut self, slot: Slot) -> Result<R, StoreError>
    where
        Self: Sized,
    {
        debug_assert_eq!(R::SIZE, slot.size());
        let mut buf = vec![0u8; slot.size()];
        self.read(slot, &mut buf)?;
        Ok(R::decode(&buf))
    }

    /// Encode and durably write one record.
    fn save<R: FramRecord>(&mut self, slot: Slot, record: &R) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        debug_assert_eq!(R::SIZE, slot.size());
        let mut buf = vec![0u8; slot.size()];
        record.encode_into(&mut buf);
        self.write(slot, &buf)
    }
}

fn check_size(slot: Slot, actual: usize) -> Result<(), StoreError> {
    if actual == slot.size() {
        Ok(())
    } else {
        Err(StoreError::SizeMismatch {
            slot,
            expected: slot.size(),
            actual,
        })
    }
}

/// In-memory store that reads back erased-FRAM bytes (`0xFF`) until
/// written. The primary test double; also useful for dry runs.
pub struct MemoryStore {
    data: Vec<u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            data: vec![0xFF; Slot::total_span()],
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for MemoryStore {
    fn read(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), StoreError> {
        check_size(slot, buf.len())?;
        let at = slot.offset();
        buf.copy_from_slice(&self.data[at..at + slot.size()]);
        Ok(())
    }

    fn write(&mut self, slot: Slot, bytes: &[u8]) -> Result<(), StoreError> {
        check_size(slot, bytes.len())?;
        let at = slot.offset();
        self.data[at..at + slot.size()].copy_from_slice(bytes);
        Ok(())
    }
}

/// Flat-file store for running the core on a host: one file, slots packed
/// at their layout offsets, created `0xFF`-filled like erased FRAM.
///
/// Each write is followed by `sync_data`, so a returned `Ok` means the
/// record reached the medium, matching FRAM write-through semantics.
pub struct FileStore {
    file: File,
}

impl FileStore {
    /// Open (or create and `0xFF`-fill) the store file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let io_err = StoreError::Open;
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;

        let len = file.metadata().map_err(io_err)?.len();
        if len < Slot::total_span() as u64 {
            // fresh (or truncated) file: present erased FRAM to the core
            file.seek(SeekFrom::Start(0)).map_err(io_err)?;
            file.write_all(&vec![0xFF; Slot::total_span()]).map_err(io_err)?;
            file.sync_data().map_err(io_err)?;
        }
        Ok(FileStore { file })
    }
}

impl SlotStore for FileStore {
    fn read(&mut self, slot: Slot, buf: &mut [u8]) -> Result<(), StoreError> {
        check_size(slot, buf.len())?;
        let io_err = |source| StoreError::Io { slot, source };
        self.file
            .seek(SeekFrom::Start(slot.offset() as u64))
            .map_err(io_err)?;
        self.file.read_exact(buf).map_err(io_err)
    }

    fn write(&mut self, slot: Slot, bytes: &[u8]) -> Result<(), StoreError> {
        check_size(slot, bytes.len())?;
        let io_err = |source| StoreError::Io { slot, source };
        self.file
            .seek(SeekFrom::Start(slot.offset() as u64))
            .map_err(io_err)?;
        self.file.write_all(bytes).map_err(io_err)?;
        self.file.sync_data().map_err(io_err)
    }
}
