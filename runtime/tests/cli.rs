//! Exercises the `fn-run` binary end to end: stdin -> Stream Reader -> Orchestrator (with
//! `--exec cat` as the test hook) -> Stream Writer -> stdout.

use std::io::Write as _;
use std::process::{Command, Stdio};

fn function_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("fn.yaml");
    std::fs::write(
        &path,
        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: fn\n",
    )
    .unwrap();
    path
}

#[test]
fn round_trips_a_multi_document_stream_through_the_identity_hook() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg_path = function_config(tmp.path());

    let mut child = Command::new(env!("CARGO_BIN_EXE_fn-run"))
        .arg(&cfg_path)
        .args(["--exec", "cat"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn fn-run");

    let input = "apiVersion: v1\nkind: Deployment\nmetadata:\n  name: deployment-foo\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: service-foo\n";
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("name: deployment-foo"));
    assert!(stdout.contains("name: service-foo"));
    // the transient index annotation should not survive to final output by default.
    assert!(!stdout.contains("config.kubernetes.io/index"));
}
