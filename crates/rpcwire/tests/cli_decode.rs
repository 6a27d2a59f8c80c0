#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_file(tag: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rpcwire-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join("input.bin");
    std::fs::write(&path, contents).expect("input file should be writable");
    path
}

fn rpcwire(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rpcwire"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("rpcwire should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should accept input");
    child.wait_with_output().expect("rpcwire should exit")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

const STREAM: &[u8] = b"Content-Length: 33\r\n\r\n{\"jsonrpc\":\"2.0\",\"method\":\"exit\"}\
Content-Length: 2\nContent-Type: text/plain\n\nhi";

#[test]
fn decode_stdin_byte_by_byte() {
    let output = rpcwire(&["decode", "--format", "json", "--chunk-size", "1"], STREAM);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["content_length"], 33);
    assert_eq!(lines[1]["body"], "hi");
    assert_eq!(lines[1]["content_type"], "text/plain");
}

#[test]
fn decode_file_with_commands() {
    let path = unique_temp_file("commands", STREAM);
    let output = rpcwire(
        &[
            "decode",
            path.to_str().expect("utf-8 path"),
            "--format",
            "json",
            "--commands",
            "--count",
            "1",
        ],
        b"",
    );
    assert!(output.status.success());

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["command"]["kind"], "notification");
    assert_eq!(lines[0]["command"]["method"], "exit");
    let _ = std::fs::remove_dir_all(path.parent().expect("temp dir"));
}

#[test]
fn decode_rejects_zero_length() {
    let output = rpcwire(&["decode", "--format", "json"], b"Content-Length: 0\r\n\r\n");
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid Content-Length"));
}

#[test]
fn decode_prints_messages_before_framing_error() {
    for chunk in ["1", "8192"] {
        let output = rpcwire(
            &["decode", "--format", "json", "--chunk-size", chunk],
            b"Content-Length: 2\r\n\r\nokX-Bad: \r\n\r\n",
        );
        assert_eq!(output.status.code(), Some(60), "chunk {chunk}");

        let lines = json_lines(&output);
        assert_eq!(lines.len(), 1, "chunk {chunk}");
        assert_eq!(lines[0]["body"], "ok");
    }
}

#[test]
fn decode_rejects_truncated_input() {
    let output = rpcwire(&["decode"], b"Content-Length: 10\r\n\r\nabc");
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn encode_output_decodes_again() {
    let encoded = rpcwire(
        &["encode", "--json", r#"{"jsonrpc":"2.0","method":"initialized"}"#],
        b"",
    );
    assert!(encoded.status.success());
    assert!(encoded.stdout.starts_with(b"Content-Length: 40\r\n\r\n"));

    let decoded = rpcwire(&["decode", "--format", "raw"], &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(decoded.stdout, br#"{"jsonrpc":"2.0","method":"initialized"}"#);
}

#[test]
fn encode_rejects_unframeable_content_type() {
    let output = rpcwire(&["encode", "--data", "hi", "--content-type", ""], b"");
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}

#[test]
fn encode_rejects_invalid_json() {
    let output = rpcwire(&["encode", "--json", "{nope"], b"");
    assert_eq!(output.status.code(), Some(64));
}
