#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_RUNTIME: &str =
    include_str!("../../../crates/container-exec/tests/fixtures/fake-runtime.sh");

/// A temp workspace holding a fake runtime CLI and a menu file, with a
/// ready-made `roninctl` command pointed at both.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("containers")).unwrap();
        let script = dir.path().join("fake-runtime.sh");
        fs::write(&script, FAKE_RUNTIME).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn runtime_path(&self) -> PathBuf {
        self.dir.path().join("fake-runtime.sh")
    }

    pub fn menu_path(&self) -> PathBuf {
        self.dir.path().join("menu.yaml")
    }

    pub fn write_menu(&self, yaml: &str) -> &Self {
        fs::write(self.menu_path(), yaml).unwrap();
        self
    }

    pub fn with_container(&self, name: &str, running: &str) -> &Self {
        fs::write(
            self.dir.path().join("containers").join(name),
            format!("{}\n", running),
        )
        .unwrap();
        self
    }

    pub fn set_running(&self, names: &[&str]) {
        let mut body = names.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(self.dir.path().join("running"), body).unwrap();
    }

    pub fn stop_daemon(&self) {
        fs::write(self.dir.path().join("daemon-down"), b"").unwrap();
    }

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

    /// `roninctl --runtime <fake> --menu <menu.yaml>` with the ambient
    /// environment scrubbed.
    pub fn roninctl(&self) -> Command {
        let mut cmd = Command::cargo_bin("roninctl").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RONIN_MENU")
            .env_remove("RONIN_CONTAINER_RUNTIME")
            .env_remove("RONIN_EXEC_TIMEOUT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--runtime")
            .arg(self.runtime_path())
            .arg("--menu")
            .arg(self.menu_path());
        cmd
    }
}

pub const SAMPLE_MENU: &str = r#"project: "shop"
menu:
  - title: "Database"
    items:
      - label: "Greet"
        container: "db1"
        command: "echo hello from db"
      - label: "Fail"
        container: "db1"
        command: "echo partial; echo oops >&2; exit 2"
  - title: "App"
    items:
      - label: "Show Env"
        container: "app1"
        command: "echo \"mode=$APP_MODE\""
        env:
          APP_MODE: "staging"
      - label: "Slow"
        container: "app1"
        command: "sleep 5"
        timeout: "300ms"
"#;
