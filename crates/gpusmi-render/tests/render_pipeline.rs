//! End-to-end pipeline tests: store → capture → render → route.

use gpusmi_render::ReportSession;
use gpusmi_types::{Compatibility, Destination, DeviceHandle, OutputFormat};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn file_session(
    compatibility: Compatibility,
    format: OutputFormat,
    path: &Path,
) -> ReportSession {
    ReportSession::new(
        compatibility,
        format,
        Destination::file(path),
        Box::new(|handle: DeviceHandle| handle.raw() as u32),
    )
}

#[test]
fn test_csv_single_device_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let mut session = file_session(Compatibility::AmdSmi, OutputFormat::Csv, &path);

    session.store(
        DeviceHandle::new(0),
        "values",
        json!({"power": {"average_socket_power": 15, "gfx_voltage": 900}}),
    );
    session.print(false, false).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "gpu,average_socket_power,gfx_voltage\n0,15,900\n"
    );
}

#[test]
fn test_csv_header_ignores_later_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let mut session = file_session(Compatibility::AmdSmi, OutputFormat::Csv, &path);

    session.store(DeviceHandle::new(0), "values", json!({"fan": 34}));
    session.capture_device();
    session.store(
        DeviceHandle::new(1),
        "values",
        json!({"fan": 40, "extra_sensor": 7}),
    );
    session.capture_device();
    session.print(true, false).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "gpu,fan\n0,34\n1,40\n");
}

#[test]
fn test_json_output_round_trips_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let mut session = file_session(Compatibility::AmdSmi, OutputFormat::Json, &path);

    let payload = json!({
        "asic": {"market_name": "Instinct MI210", "vendor_id": "0x1002"},
        "usage": {"gfx_activity": 12}
    });
    session.store(DeviceHandle::new(0), "values", payload);
    session.print(false, false).unwrap();

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({
            "gpu": 0,
            "asic": {"market_name": "Instinct MI210", "vendor_id": "0x1002"},
            "usage": {"gfx_activity": 12}
        })
    );

    // Key case and insertion order survive the round trip.
    let text = fs::read_to_string(&path).unwrap();
    let gpu_at = text.find("\"gpu\"").unwrap();
    let asic_at = text.find("\"asic\"").unwrap();
    let usage_at = text.find("\"usage\"").unwrap();
    assert!(gpu_at < asic_at && asic_at < usage_at);
}

#[test]
fn test_human_readable_multi_device_blocks_concatenate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let mut session = file_session(Compatibility::AmdSmi, OutputFormat::HumanReadable, &path);

    session.store(
        DeviceHandle::new(0),
        "values",
        json!({"asic": {"market_name": "X"}}),
    );
    session.capture_device();
    session.store(
        DeviceHandle::new(1),
        "values",
        json!({"asic": {"market_name": "Y"}}),
    );
    session.capture_device();
    session.print(true, false).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "GPU: 0\nASIC:\n    MARKET_NAME: X\nGPU: 1\nASIC:\n    MARKET_NAME: Y\n"
    );
}

#[test]
fn test_watch_ticks_append_then_flush_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch.json");
    let mut session = file_session(Compatibility::AmdSmi, OutputFormat::Json, &path);

    for tick in 0..3u64 {
        session.reset();
        session.store(DeviceHandle::new(0), "values", json!({"fan": 30 + tick}));
        session.capture_sample(false);
        session.print(false, true).unwrap();
    }

    // Three appended record blocks, not yet a parseable document.
    let appended = fs::read_to_string(&path).unwrap();
    assert_eq!(appended.matches("\"fan\"").count(), 3);
    assert!(serde_json::from_str::<Value>(&appended).is_err());

    session.flush_watch().unwrap();

    // The flush rewrites the file from scratch with the sample history.
    let flushed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let samples = flushed.as_array().expect("history is an array");
    assert_eq!(samples.len(), 3);
    for (tick, sample) in samples.iter().enumerate() {
        assert!(sample["timestamp"].is_i64());
        assert_eq!(sample["values"]["fan"], json!(30 + tick as u64));
    }
    assert!(session.watch_history().is_empty());
}

#[test]
fn test_watch_ticks_produce_no_csv_or_human_output() {
    let dir = tempfile::tempdir().unwrap();
    for format in [OutputFormat::Csv, OutputFormat::HumanReadable] {
        let path = dir.path().join(format!("tick.{}", format));
        let mut session = file_session(Compatibility::AmdSmi, format, &path);

        session.store(DeviceHandle::new(0), "values", json!({"fan": 34}));
        session.capture_sample(false);
        session.print(false, true).unwrap();
        session.flush_watch().unwrap();

        assert!(!path.exists(), "{} wrote watch output", format);
    }
}

#[test]
fn test_gpuvsmi_csv_report_masks_and_renames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gpuv.csv");
    let mut session = file_session(Compatibility::GpuvSmi, OutputFormat::Csv, &path);

    session.store(
        DeviceHandle::new(0),
        "values",
        json!({
            "bdf": "0000:23:00.0",
            "asic": {"market_name": "X"},
            "power": {"socket_power": "AMDSMI_STATUS_NOT_SUPPORTED", "gfx_voltage": 900}
        }),
    );
    session.print(false, false).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "gpu,gpu_bdf,asic_market_name,socket_power,gfx_voltage\n0,0000:23:00.0,X,N/A,900\n"
    );
}
