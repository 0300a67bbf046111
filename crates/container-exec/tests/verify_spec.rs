#![cfg(unix)]

mod common;

use common::FakeRuntime;
use container_exec::{ContainerRuntime, ErrorKind, ExecError};

#[test]
fn running_container_verifies() {
    let fake = FakeRuntime::new().with_container("db1", "true");
    fake.runtime().verify("db1").unwrap();

    assert_eq!(
        fake.invocations(),
        vec!["inspect db1 --format={{.State.Running}}"]
    );
}

#[test]
fn unreachable_runtime_is_reported_before_missing_container() {
    let fake = FakeRuntime::new().with_container("db1", "true");
    fake.stop_daemon();

    let err = fake.runtime().verify("db1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RuntimeUnavailable);
    assert!(err.to_string().contains("not running or not accessible"));

    let calls = fake.invocations();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("inspect db1"));
    assert!(calls[1].starts_with("version"));
}

#[test]
fn missing_container_names_the_identifier() {
    let fake = FakeRuntime::new();

    let err = fake.runtime().verify("ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContainerNotFound);
    assert!(err.to_string().contains("'ghost'"));
    assert!(err.to_string().contains("ps -a"));
    match err {
        ExecError::ContainerNotFound { detail, .. } => {
            assert_eq!(detail.as_deref(), Some("Error: No such object: ghost"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stopped_or_paused_containers_are_not_running() {
    for state in ["false", "paused"] {
        let fake = FakeRuntime::new().with_container("db1", state);
        let err = fake.runtime().verify("db1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContainerNotRunning, "state {state}");
        assert!(err.to_string().contains("'db1'"));
        assert!(err.to_string().contains("start db1"));
        // A reachable inspect never falls back to the probe.
        assert_eq!(fake.invocations().len(), 1);
    }
}

#[test]
fn missing_runtime_binary_reads_as_unavailable() {
    let runtime = ContainerRuntime::new("/nonexistent/ronin-runtime");
    let err = runtime.verify("db1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RuntimeUnavailable);
}

#[test]
fn probe_reflects_daemon_state() {
    let fake = FakeRuntime::new();
    assert!(fake.runtime().is_available());
    assert_eq!(
        fake.invocations(),
        vec!["version --format={{.Server.Version}}"]
    );

    fake.stop_daemon();
    assert!(!fake.runtime().is_available());
}

#[test]
fn verification_is_not_cached_between_calls() {
    let fake = FakeRuntime::new().with_container("db1", "true");
    let runtime = fake.runtime();

    assert_eq!(runtime.execute("db1", "echo ok").unwrap(), "ok");

    fake.set_state("db1", "false");
    let err = runtime.execute("db1", "echo ok").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContainerNotRunning);
}

#[test]
fn flag_like_names_are_rejected_without_touching_the_runtime() {
    let fake = FakeRuntime::new();
    let runtime = fake.runtime();

    let err = runtime.verify("--help").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(err.to_string().contains("must not start with '-'"));

    let err = runtime.execute("-it", "true").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);

    let err = runtime
        .copy_to("--archive", std::path::Path::new("a.txt"), "/tmp/a.txt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);

    assert!(fake.invocations().is_empty());
}
