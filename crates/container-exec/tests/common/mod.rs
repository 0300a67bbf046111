#![allow(dead_code)]

use container_exec::ContainerRuntime;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Shared with the roninctl CLI tests.
const FAKE_RUNTIME: &str = include_str!("../fixtures/fake-runtime.sh");

/// A scripted stand-in for the runtime CLI, driven entirely by files in a
/// temp directory so tests never touch the process environment.
pub struct FakeRuntime {
    dir: TempDir,
}

impl FakeRuntime {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("containers")).unwrap();
        let script = dir.path().join("fake-runtime.sh");
        fs::write(&script, FAKE_RUNTIME).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn runtime(&self) -> ContainerRuntime {
        ContainerRuntime::new(self.dir.path().join("fake-runtime.sh"))
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Register a container whose inspect reports `running` as its state.
    pub fn with_container(self, name: &str, running: &str) -> Self {
        self.set_state(name, running);
        self
    }

    pub fn set_state(&self, name: &str, running: &str) {
        fs::write(self.dir.path().join("containers").join(name), format!("{}\n", running))
            .unwrap();
    }

    pub fn stop_daemon(&self) {
        fs::write(self.dir.path().join("daemon-down"), b"").unwrap();
    }

    pub fn fail_listing(&self) {
        fs::write(self.dir.path().join("ps-fails"), b"").unwrap();
    }

    pub fn set_running(&self, names: &[&str]) {
        let mut body = names.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(self.dir.path().join("running"), body).unwrap();
    }

    /// Path inside the fake container filesystem.
    pub fn container_file(&self, container: &str, path: &str) -> PathBuf {
        self.dir
            .path()
            .join("fs")
            .join(container)
            .join(path.trim_start_matches('/'))
    }

    pub fn invocations(&self) -> Vec<String> {
        match fs::read_to_string(self.dir.path().join("invocations.log")) {
            Ok(log) => log.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}
