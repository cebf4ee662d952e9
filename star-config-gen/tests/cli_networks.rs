use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn networks_prints_table_in_enumeration_order() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("star-config-gen"));
    let output = cmd
        .arg("networks")
        .arg(fixture("fixtures/topology_trunk.toml"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let bridges: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().nth(1))
        .collect();
    assert_eq!(
        bridges,
        vec![
            "LANBridgeSplit",
            "LANBridgeDomestic",
            "LANBridgeForeign",
            "LANBridgeVPN",
            "LANBridgeForeign-Foreign-Office",
            "LANBridgeVPN-US",
        ]
    );
}

#[test]
fn networks_json_carries_vlan_ids_and_subnets() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("star-config-gen"));
    cmd.arg("networks")
        .arg(fixture("fixtures/topology_trunk.toml"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vlan_name\": \"vlan31-Foreign-Office\""))
        .stdout(predicate::str::contains("\"subnet\": \"192.168.50.0/24\""));
}

#[test]
fn networks_rejects_duplicate_names() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("star-config-gen"));
    cmd.arg("networks")
        .arg(fixture("fixtures/duplicate_names.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate network name"));
}
