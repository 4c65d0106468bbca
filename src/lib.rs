//! # Tide Stats Core Library
//!
//! Long-running tidal statistics for a power-constrained field sensor:
//! converts a stream of periodic water-level readings into running
//! estimates of mean sea level (MSL), mean lower-low water (MLLW), and
//! mean higher-high water (MHHW), persisting all derived state so it
//! survives power loss and resets.
//!
//! ## Design Philosophy
//!
//! ### Constant memory
//! The station may run unattended for years, so nothing here stores a
//! sample history. Means and variances come from a one-pass accumulator
//! ([`RunningStat`]); tidal cycles are segmented online by a small state
//! machine ([`datum::PeriodTracker`]) that keeps only the in-progress
//! period's extrema.
//!
//! ### Crash durability
//! The persistent store is the system of record. Every mutating call
//! flushes all touched entities before returning, and initialization
//! reloads everything, so power can drop at any instruction boundary
//! without corrupting the accumulated statistics. An ownership guard
//! ([`TideStats::initialize`]) resets state that belongs to a different
//! physical device.
//!
//! ### Narrow collaborator seams
//! The storage medium ([`store::SlotStore`]) and the device clock, alert,
//! and restart effects ([`node::NodePlatform`]) sit behind traits; the
//! crate ships a file adapter and a memory adapter plus a real and a
//! scriptable platform, and real FRAM hardware plugs in from a host crate.
//!
//! ## Data Flow
//! 1. **Reading**: `push_reading` folds the level into MSL and the all-time
//!    watermark, and steps the period segmenter.
//! 2. **Period close**: after ~25 hours the period's low/high extrema feed
//!    the MLLW/MHHW accumulators.
//! 3. **Flush**: every slot is written back, once per reading.
//!
//! ## Core Types
//! - [`TideStats`]: the engine binding store, platform, and identity
//! - [`RunningStat`]: numerically stable mean/variance accumulator
//! - [`datum::PeriodTracker`]: tidal-period segmentation state machine
//!
//! # Example
//! ```
//! use tide_stats_lib::{ManualPlatform, MemoryStore, NodeId, TideStats, Timing};
//!
//! let id: NodeId = "00112233445566778899aabbccddeeff".parse().unwrap();
//! let mut station = TideStats::new(
//!     MemoryStore::new(),
//!     ManualPlatform::new(1_700_000_000),
//!     id,
//!     Timing::cal_debug(),
//! );
//! station.initialize().unwrap(); // first boot: resets and takes ownership
//! station.push_reading(1.25).unwrap();
//! assert_eq!(station.msl().unwrap(), 1.25);
//! ```

// Module declarations
pub mod codec;
pub mod config;
pub mod datum;
pub mod node;
pub mod state;
pub mod stats;
pub mod store;
pub mod tide_stats;

// The public surface most hosts need
pub use config::{Config, Timing};
pub use node::{ManualPlatform, NodePlatform, SystemPlatform};
pub use state::{
    CalibrationState, DeviceState, ExtremeRecord, NodeId, NodeIdParseError, OperatingMode,
    SensorKind,
};
pub use stats::RunningStat;
pub use store::{FileStore, MemoryStore, Slot, SlotStore, StoreError};
pub use tide_stats::{StationReport, StatSummary, TideStats};
