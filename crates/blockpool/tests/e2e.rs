//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn blockpool() -> Command {
    let mut cmd = Command::cargo_bin("blockpool").expect("binary not found");
    cmd.env_remove("BLOCKPOOL_BLOCK_SIZE")
        .env_remove("BLOCKPOOL_POOL_SIZE")
        .env_remove("BLOCKPOOL_SCRUB")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn help_flag() {
    blockpool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("smoke"))
        .stdout(predicate::str::contains("stress"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    blockpool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("blockpool"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    blockpool().assert().failure().code(2);
}

#[test]
fn smoke_passes_with_defaults() {
    blockpool()
        .arg("smoke")
        .assert()
        .success()
        .stdout(predicate::str::contains("[PASS]"))
        .stdout(predicate::str::contains("double free"));
}

#[test]
fn smoke_quiet() {
    blockpool()
        .args(["smoke", "-q"])
        .assert()
        .success()
        .stdout("PASS\n");
}

#[test]
fn smoke_json() {
    let value = stdout_json(blockpool().args(["smoke", "--json"]));
    assert_eq!(value["verdict"]["passed"], true);
    assert_eq!(value["config"]["block_size"], 20);
    assert_eq!(value["config"]["capacity"], 10);
}

#[test]
fn pool_shape_from_environment() {
    let value = stdout_json(
        blockpool()
            .args(["smoke", "--json"])
            .env("BLOCKPOOL_BLOCK_SIZE", "8")
            .env("BLOCKPOOL_POOL_SIZE", "24"),
    );
    assert_eq!(value["config"]["capacity"], 3);
}

#[test]
fn zero_block_size_is_config_error() {
    blockpool()
        .args(["smoke", "--block-size", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("block size must be greater than zero"));
}

#[test]
fn pool_smaller_than_one_block_is_config_error() {
    blockpool()
        .args(["stress", "--block-size", "64", "--pool-size", "32"])
        .assert()
        .code(4);
}

#[test]
fn stress_small_run_passes() {
    let value = stdout_json(blockpool().args([
        "stress",
        "--json",
        "--threads",
        "6",
        "--rounds",
        "2",
        "--retry-limit",
        "1000",
        "--retry-wait",
        "1ms",
        "--hold-min",
        "0",
        "--hold-max",
        "2",
        "--seed",
        "42",
    ]));
    assert_eq!(value["verdict"]["passed"], true);
    assert_eq!(value["threads"], 6);
    assert_eq!(value["allocations"], 12);
    assert_eq!(value["violations"], 0);
}

#[test]
fn stress_zero_threads_is_config_error() {
    blockpool()
        .args(["stress", "--threads", "0"])
        .assert()
        .code(4);
}

#[test]
fn stress_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stress.json");
    blockpool()
        .args([
            "stress", "-q", "--threads", "2", "--hold-min", "0", "--hold-max", "1", "--output",
        ])
        .arg(&path)
        .assert()
        .success()
        .stdout("PASS\n");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["threads"], 2);
    assert_eq!(value["verdict"]["passed"], true);
}

#[test]
fn inspect_dumps_every_block() {
    blockpool()
        .args(["inspect", "--block-size", "4", "--pool-size", "12", "--allocate", "2", "--release", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("========[block #2"))
        .stdout(predicate::str::contains("de ad be ef"))
        .stdout(predicate::str::contains("(allocated) [allocated]"));
}

#[test]
fn inspect_json_free_list() {
    let value = stdout_json(blockpool().args([
        "inspect",
        "--json",
        "--block-size",
        "4",
        "--pool-size",
        "12",
        "--allocate",
        "2",
        "--release",
        "1",
    ]));
    let free = value["free_list"].as_array().unwrap();
    assert_eq!(free.len(), 2);
    assert_eq!(free[0], value["blocks"][0]["address"]);
    assert_eq!(value["blocks"][1]["state"], "allocated");
}

#[test]
fn inspect_release_more_than_allocated() {
    blockpool()
        .args(["inspect", "--allocate", "1", "--release", "2"])
        .assert()
        .code(4);
}

#[test]
fn completion_bash() {
    blockpool()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blockpool"));
}

#[test]
fn unwritable_output_is_generic_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");
    blockpool()
        .args(["smoke", "-q", "--output"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot write report"));
}
