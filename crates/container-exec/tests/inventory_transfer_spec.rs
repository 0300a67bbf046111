#![cfg(unix)]

mod common;

use common::FakeRuntime;
use container_exec::{ErrorKind, ExecError};
use std::fs;

#[test]
fn no_running_containers_is_an_empty_list() {
    let fake = FakeRuntime::new();
    assert!(fake.runtime().list_running().unwrap().is_empty());

    fake.set_running(&[]);
    assert!(fake.runtime().list_running().unwrap().is_empty());
    assert_eq!(fake.invocations()[0], "ps --format={{.Names}}");
}

#[test]
fn running_containers_are_listed_in_order() {
    let fake = FakeRuntime::new();
    fake.set_running(&["web", "db", "cache"]);

    assert_eq!(
        fake.runtime().list_running().unwrap(),
        vec!["web", "db", "cache"]
    );
}

#[test]
fn listing_failure_is_distinct_from_empty() {
    let fake = FakeRuntime::new();
    fake.fail_listing();

    let err = fake.runtime().list_running().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Spawn);
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn copy_to_places_file_inside_container() {
    let fake = FakeRuntime::new().with_container("db1", "true");
    let local = tempfile::tempdir().unwrap();
    let source = local.path().join("seed.sql");
    fs::write(&source, "select 1;").unwrap();

    fake.runtime()
        .copy_to("db1", &source, "/tmp/seed.sql")
        .unwrap();

    let copied = fs::read_to_string(fake.container_file("db1", "/tmp/seed.sql")).unwrap();
    assert_eq!(copied, "select 1;");
    assert!(fake
        .invocations()
        .contains(&format!("cp {} db1:/tmp/seed.sql", source.display())));
}

#[test]
fn copy_from_retrieves_directory_from_container() {
    let fake = FakeRuntime::new().with_container("web", "true");
    let logs = fake.container_file("web", "/var/log/app");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("app.log"), "started\n").unwrap();

    let local = tempfile::tempdir().unwrap();
    let dest = local.path().join("app-logs");

    fake.runtime()
        .copy_from("web", "/var/log/app", &dest)
        .unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("app.log")).unwrap(),
        "started\n"
    );
}

#[test]
fn copy_requires_a_running_container() {
    let fake = FakeRuntime::new().with_container("db1", "false");
    let local = tempfile::tempdir().unwrap();

    let err = fake
        .runtime()
        .copy_from("db1", "/etc/hostname", &local.path().join("hostname"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ContainerNotRunning);
    assert!(!fake.invocations().iter().any(|line| line.starts_with("cp")));
}

#[test]
fn failed_copy_surfaces_runtime_stderr() {
    let fake = FakeRuntime::new().with_container("db1", "true");
    let local = tempfile::tempdir().unwrap();

    let err = fake
        .runtime()
        .copy_from("db1", "/does/not/exist", &local.path().join("out"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Spawn);
    assert!(matches!(
        err,
        ExecError::RuntimeCommand { operation: "cp", .. }
    ));
}
