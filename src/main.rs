//! # Tide Stats Host Binary
//!
//! Development host for the statistics core: replays a reading log through
//! the engine against a file-backed store and prints the station report.
//! It stands in for the out-of-scope command/telemetry layer, the way a
//! bench terminal stands in for the field unit's radio.
//!
//! Usage:
//! ```text
//! tide-stats --status            # print the station report and exit
//! tide-stats --json              # same, as JSON
//! tide-stats --clear             # zero all persisted state
//! tide-stats --replay FILE       # push "time,distance" CSV lines
//! tide-stats --replay FILE --calibrate   # push them as calibration readings
//! tide-stats --debug-timing      # use the minutes-scale bench thresholds
//! ```

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::DateTime;
use std::env;
use std::fs;
use tide_stats_lib::{Config, FileStore, NodeId, StationReport, SystemPlatform, TideStats, Timing};

/// Development fallback identity used when the config names no node id.
/// Real deployments always provision one; the fallback keeps bench replay
/// working against a scratch store.
const DEV_NODE_ID: &str = "00000000000000000000000000000001";

/// Render a unix-seconds timestamp for the text report.
fn format_time(unix: u32) -> String {
    if unix == 0 {
        return "never".to_string();
    }
    match DateTime::from_timestamp(i64::from(unix), 0) {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("t={unix}"),
    }
}

/// Print the station report in the terminal layout.
fn print_report(report: &StationReport) {
    println!("Station {}", report.node_id);
    println!(
        "  mode {}  sensor {}  position {:.4}, {:.4}",
        report.mode, report.sensor_kind, report.lat, report.lon
    );
    println!("  last reading: {}", format_time(report.last_reading_time));
    println!(
        "  MSL  {:>10.4}  sd {:>8.4}  n {}",
        report.msl.mean, report.msl.std_dev, report.msl.count
    );
    println!(
        "  MLLW {:>10.4}  sd {:>8.4}  n {}",
        report.mllw.mean, report.mllw.std_dev, report.mllw.count
    );
    println!(
        "  MHHW {:>10.4}  sd {:>8.4}  n {}",
        report.mhhw.mean, report.mhhw.std_dev, report.mhhw.count
    );
    if report.mllw.count == 0 {
        println!(
            "  first MLLW value in {:.1} h",
            report.mllw_calibration_hours_left
        );
    }
    println!(
        "  record high {:.4} at {}",
        report.extreme.high,
        format_time(report.extreme.high_time)
    );
    println!(
        "  record low  {:.4} at {}",
        report.extreme.low,
        format_time(report.extreme.low_time)
    );
    println!(
        "  calibration: {} ({} readings over {} s, mean distance {:.4})",
        if report.calibrated { "done" } else { "pending" },
        report.calibration_readings,
        report.calibration_duration_s,
        report.calibration_distance
    );
}

/// Parse one replay line: `unix_time,distance_up`. Blank lines and `#`
/// comments are skipped by the caller.
fn parse_line(line: &str) -> anyhow::Result<(u32, f64)> {
    let (time_text, dist_text) = line
        .split_once(',')
        .with_context(|| format!("expected `time,distance`, got {line:?}"))?;
    let time = time_text
        .trim()
        .parse::<u32>()
        .with_context(|| format!("bad timestamp in {line:?}"))?;
    let dist = dist_text
        .trim()
        .parse::<f64>()
        .with_context(|| format!("bad distance in {line:?}"))?;
    Ok((time, dist))
}

/// Value of a `--flag VALUE` argument pair, if present.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|at| args.get(at + 1))
        .cloned()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config_path =
        arg_value(&args, "--config").unwrap_or_else(|| "tide-config.toml".to_string());
    let config = Config::load_from_path(&config_path);

    let timing = if args.iter().any(|arg| arg == "--debug-timing") {
        Timing::cal_debug()
    } else {
        config.timing
    };

    let node_id: NodeId = if config.station.node_id.is_empty() {
        eprintln!("No node id in config; using the development identity");
        DEV_NODE_ID
            .parse()
            .context("development identity is malformed")?
    } else {
        config
            .station
            .node_id
            .parse()
            .context("station.node_id in config is not a 32-character hex id")?
    };

    let store = FileStore::open(&config.station.store_path)
        .with_context(|| format!("open state store {}", config.station.store_path))?;
    let mut station = TideStats::new(store, SystemPlatform, node_id, timing);
    station.initialize().context("initialize station state")?;

    if args.iter().any(|arg| arg == "--clear") {
        station.clear().context("clear station state")?;
        println!("Station state cleared");
        return Ok(());
    }

    if let Some(path) = arg_value(&args, "--replay") {
        let calibrate = args.iter().any(|arg| arg == "--calibrate");
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read replay log {path}"))?;

        let mut pushed = 0u32;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (time, dist) = parse_line(line)?;
            if calibrate {
                station
                    .push_calibration_reading_at(dist, time)
                    .with_context(|| format!("push calibration reading at t={time}"))?;
            } else {
                station
                    .push_reading_at(dist, time)
                    .with_context(|| format!("push reading at t={time}"))?;
            }
            pushed += 1;
        }
        eprintln!("Replayed {pushed} readings from {path}");
    }

    let report = station.report().context("build station report")?;
    if args.iter().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Station: {}", config.station.name);
        print_report(&report);
    }
    Ok(())
}
