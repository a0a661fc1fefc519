use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_resdoc")));
    cmd.env_remove("RUST_LOG").env_remove("RESDOC_LOG_FORMAT");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

// -- file mode --

#[test]
fn file_mode_writes_site() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("aws.json"))
        .assert()
        .success();

    for page in [
        "index.rst",
        "ec2/index.rst",
        "ec2/vpc.rst",
        "ec2/vpc-finder.rst",
        "ec2/dhcp-option.rst",
    ] {
        assert!(dir.path().join(page).exists(), "missing {}", page);
    }
    assert!(!dir.path().join("ec2/route.rst").exists());
}

#[test]
fn file_mode_resource_page_matches_expected() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("aws.json"))
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("ec2/vpc.rst")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("vpc.expected.rst")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn file_mode_indexes() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("aws.json"))
        .assert()
        .success();

    let group = std::fs::read_to_string(dir.path().join("ec2/index.rst")).unwrap();
    assert_eq!(
        group,
        "EC2\n===\n\n.. toctree::\n    :maxdepth: 1\n\n    dhcp-option\n    vpc\n"
    );

    let top = std::fs::read_to_string(dir.path().join("index.rst")).unwrap();
    assert!(top.starts_with("Amazon Web Services provider.\n\nAuthenticate with @credentials.\n\n"));
    assert!(top.ends_with("    ec2/index\n"));
}

#[test]
fn finder_links_back_to_resource() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("aws.json"))
        .assert()
        .success();

    let finder = std::fs::read_to_string(dir.path().join("ec2/vpc-finder.rst")).unwrap();
    assert!(finder.contains(":ref:`Back to resource <Resource_Query_Link_EC2_vpc_Resource>`"));
    assert!(finder.contains("    * - vpc-id\n      - The ID of the VPC.\n"));
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("aws.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn directory_input_is_scanned() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::copy(fixture_path("aws.json"), input.path().join("aws.json")).unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(input.path())
        .assert()
        .success();

    assert!(dir.path().join("ec2/vpc.rst").exists());
}

// -- stdout mode --

#[test]
fn stdout_mode_prints_every_file() {
    cmd()
        .arg("--stdout")
        .arg(fixture_path("aws.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(".. file: ec2/vpc.rst\n\n.. _Resource_Query_Link_EC2_vpc_Resource:"))
        .stdout(predicate::str::contains(".. file: ec2/index.rst"))
        .stdout(predicate::str::contains(".. file: index.rst"));
}

#[test]
fn logs_go_to_stderr() {
    cmd()
        .arg("--stdout")
        .arg(fixture_path("aws.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("generating documentation").not())
        .stderr(predicate::str::contains("generating documentation"));
}

#[test]
fn json_log_format() {
    cmd()
        .env("RESDOC_LOG_FORMAT", "json")
        .arg("--stdout")
        .arg(fixture_path("aws.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("\"message\":\"generating documentation\""));
}

// -- configuration --

#[test]
fn root_prefix_changes_namespace() {
    cmd()
        .args(["--stdout", "--root-prefix", "gyro.aws"])
        .arg(fixture_path("aws.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("aws::vpc\n===").not())
        .stdout(predicate::str::contains("\nvpc\n===\n"));
}

// -- errors --

#[test]
fn invalid_json_fails() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    cmd()
        .arg("--stdout")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid metadata"));
}

#[test]
fn no_matching_input_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.json", dir.path().display());

    cmd()
        .arg("--stdout")
        .arg(pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no metadata input given"));
}
