use crate::MenuError;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// A complete, valid menu used as a starting point by `roninctl init`.
pub const EXAMPLE_MENU: &str = r#"project: "my-project"
theme: "ronin"

menu:
  - title: "Database Operations"
    items:
      - label: "Check Database Status"
        container: "my-database"
        command: "pg_isready -h localhost -p 5432"

      - label: "Show Database Version"
        container: "my-database"
        command: "psql --version"

      - label: "Open psql Shell"
        container: "my-database"
        command: "psql -U postgres"
        interactive: true

  - title: "Application Operations"
    items:
      - label: "Check App Health"
        container: "my-app"
        command: "curl -f http://localhost:8080/health || echo 'Health check failed'"
        timeout: "10s"

      - label: "View Logs"
        container: "my-app"
        command: "tail -n 20 /var/log/app.log"

      - label: "Show App Environment"
        container: "my-app"
        command: "echo \"running in $APP_ENV\""
        env:
          APP_ENV: "staging"

  - title: "System Operations"
    items:
      - label: "Check Disk Usage"
        container: "my-app"
        command: "df -h"

      - label: "Check Memory Usage"
        container: "my-app"
        command: "free -m"
"#;

/// Write [`EXAMPLE_MENU`] to `path`, refusing to overwrite anything.
pub fn write_example_menu(path: &Path) -> Result<(), MenuError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                MenuError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                MenuError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    file.write_all(EXAMPLE_MENU.as_bytes())
        .map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), "example menu written");
    Ok(())
}
