//! Integration test: Verify binary prints correct version and usage

use std::process::Command;

#[test]
fn binary_prints_version() {
    // EXPECT: Binary runs and prints the Cargo.toml version to stdout
    let output = Command::new(env!("CARGO_BIN_EXE_vaultnav"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // VERIFY: Output names the binary and its version
    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")) && stdout.contains("vaultnav"),
        "Expected output to contain 'vaultnav {}', but got: {}",
        env!("CARGO_PKG_VERSION"),
        stdout
    );
}

#[test]
fn unknown_search_tool_is_rejected_before_startup() {
    // EXPECT: Argument parsing fails without touching the terminal
    let output = Command::new(env!("CARGO_BIN_EXE_vaultnav"))
        .args(["--search-tool", "ack"])
        .output()
        .expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("ack"), "stderr was: {}", stderr);
}
