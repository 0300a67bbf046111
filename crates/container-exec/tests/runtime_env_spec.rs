use container_exec::{ContainerRuntime, RUNTIME_ENV_VAR};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn from_env_defaults_to_docker() {
    env::remove_var(RUNTIME_ENV_VAR);
    assert_eq!(ContainerRuntime::from_env().display_name(), "docker");

    env::set_var(RUNTIME_ENV_VAR, "   ");
    assert_eq!(ContainerRuntime::from_env().display_name(), "docker");
    env::remove_var(RUNTIME_ENV_VAR);
}

#[test]
#[serial]
fn from_env_honours_override() {
    env::set_var(RUNTIME_ENV_VAR, "podman");
    let runtime = ContainerRuntime::from_env();
    env::remove_var(RUNTIME_ENV_VAR);

    assert_eq!(runtime, ContainerRuntime::new("podman"));
    assert_eq!(runtime.display_name(), "podman");
}
