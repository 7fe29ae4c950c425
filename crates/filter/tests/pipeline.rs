//! End-to-end tests driving the real binaries over pipes.
//!
//! Piped stdin means the splice path is live in every test here; the
//! in-memory copy fallback is covered by the unit tests.

use std::io::{Read, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

fn chunk_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chunk"))
}

fn dechunk_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dechunk"))
}

fn run_with_input(mut cmd: Command, input: &[u8]) -> Output {
    let mut child =
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped()).spawn().expect("spawn filter");
    let mut stdin = child.stdin.take().unwrap();
    let input = input.to_vec();
    // the child may exit before consuming everything (e.g. on a framing
    // error), so EPIPE from this write is expected in failure tests
    let writer = thread::spawn(move || {
        let _ = stdin.write_all(&input);
    });
    let output = child.wait_with_output().expect("wait for filter");
    writer.join().unwrap();
    output
}

#[test]
fn test_dechunk_single_chunk() {
    let output = run_with_input(dechunk_cmd(), b"3\r\nabc\r\n0\r\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"abc");
}

#[test]
fn test_dechunk_bare_lf_framing() {
    let output = run_with_input(dechunk_cmd(), b"5\nhello\n3\r\nabc\n0\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"helloabc");
}

#[test]
fn test_dechunk_final_marker_alone() {
    let output = run_with_input(dechunk_cmd(), b"0\r\n");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_dechunk_truncated_body_fails() {
    let output = run_with_input(dechunk_cmd(), b"5\r\nhel");
    assert_eq!(output.status.code(), Some(1));
    // bytes already forwarded are not retracted
    assert_eq!(output.stdout, b"hel");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("premature EOF"), "stderr was: {stderr}");
}

#[test]
fn test_dechunk_non_hex_size_fails() {
    let output = run_with_input(dechunk_cmd(), b"xyz\r\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("illegal byte"), "stderr was: {stderr}");
}

#[test]
fn test_chunk_empty_input() {
    let output = run_with_input(chunk_cmd(), b"");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"0\r\n");
}

#[test]
fn test_chunk_output_shape() {
    let output = run_with_input(chunk_cmd(), b"abc");
    assert!(output.status.success());
    // chunk boundaries depend on pipe timing, but the stream always ends
    // with exactly the three-byte final marker and nothing after it
    assert!(output.stdout.ends_with(b"0\r\n"));
    assert!(output.stdout[0].is_ascii_hexdigit());
    assert!(!output.stdout.ends_with(b"0\r\n0\r\n"));
}

#[test]
fn test_chunk_then_dechunk_small() {
    let encoded = run_with_input(chunk_cmd(), b"abc");
    assert!(encoded.status.success());

    let decoded = run_with_input(dechunk_cmd(), &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(decoded.stdout, b"abc");
}

#[test]
fn test_pipeline_round_trip_large() {
    let input: Vec<u8> = (0..1_000_000u32).map(|i| (i % 251) as u8).collect();

    let mut chunk = chunk_cmd().stdin(Stdio::piped()).stdout(Stdio::piped()).spawn().expect("spawn chunk");
    let chunk_out = chunk.stdout.take().unwrap();
    let mut dechunk =
        dechunk_cmd().stdin(Stdio::from(chunk_out)).stdout(Stdio::piped()).spawn().expect("spawn dechunk");

    let mut stdin = chunk.stdin.take().unwrap();
    let data = input.clone();
    let writer = thread::spawn(move || {
        let _ = stdin.write_all(&data);
    });

    let mut output = Vec::new();
    dechunk.stdout.take().unwrap().read_to_end(&mut output).expect("read dechunk output");
    writer.join().unwrap();

    assert!(chunk.wait().unwrap().success());
    assert!(dechunk.wait().unwrap().success());
    assert_eq!(output, input);
}
