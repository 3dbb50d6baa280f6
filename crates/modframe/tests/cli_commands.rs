#![cfg(all(unix, feature = "cli"))]

use std::path::PathBuf;
use std::process::{Command, Output};

fn modframe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modframe"))
        .args(["--log-level", "error"])
        .args(args)
        .env_remove("MODFRAME_DEVICES")
        .env_remove("MODFRAME_ROLE")
        .output()
        .expect("modframe should run")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect()
}

fn temp_file(tag: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "modframe-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}

#[test]
fn crc_prints_wire_bytes() {
    let output = modframe(&["--format", "json", "crc", "01 03 00 00 00 0A"]);

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines[0]["crc"], "0xC5CD");
    assert_eq!(lines[0]["wire"], "C5CD");
}

#[test]
fn encode_appends_checksum() {
    let output = modframe(&["--format", "raw", "encode", "0300000001", "--device", "17"]);

    assert!(output.status.success());
    let wire = output.stdout;
    assert_eq!(&wire[..6], &[0x11, 0x03, 0x00, 0x00, 0x00, 0x01]);
    assert_eq!(wire.len(), 8);
}

#[test]
fn decode_hex_argument() {
    let output = modframe(&[
        "--format",
        "json",
        "decode",
        "FF00 0103 0200 2A39 9B",
        "--chunk-size",
        "2",
    ]);

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["device_id"], 1);
    assert_eq!(lines[0]["function_name"], "READ_HOLDING_REGISTERS");
    assert_eq!(lines[0]["data"], "02002A");
}

#[test]
fn decode_binary_file_as_server_with_filter() {
    // Separate reads, so dropping device 1 does not discard device 2's frame.
    let mut wire = vec![0x01, 0x03, 0x00, 0x00, 0x00, 0x0A, 0xC5, 0xCD];
    let encoded = modframe(&["--format", "raw", "encode", "0600010003", "--device", "2"]);
    assert!(encoded.status.success());
    wire.extend(&encoded.stdout);
    let path = temp_file("server", &wire);

    let output = modframe(&[
        "--format",
        "json",
        "decode",
        "--file",
        path.to_str().expect("temp path should be utf-8"),
        "--binary",
        "--role",
        "server",
        "--devices",
        "2",
        "--chunk-size",
        "8",
    ]);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["device_id"], 2);
    assert_eq!(lines[0]["function_code"], 6);
}

#[test]
fn decode_rejects_bad_hex() {
    let output = modframe(&["decode", "0103F"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_missing_file_fails() {
    let output = modframe(&["decode", "--file", "/nonexistent/modframe-capture.bin", "--binary"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed reading"));
}

#[test]
fn version_reports_package_version() {
    let output = modframe(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("modframe {}", env!("CARGO_PKG_VERSION")));
}
