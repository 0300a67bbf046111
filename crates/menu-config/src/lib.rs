//! Loading and validation of the operator task menu.
//!
//! A menu is a YAML document naming a project and a list of categories,
//! each holding tasks that pair a label with a container and a shell
//! command. See [`EXAMPLE_MENU`] for the full shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

mod example;
mod validate;

pub use example::{write_example_menu, EXAMPLE_MENU};

pub const DEFAULT_MENU_FILE: &str = "menu.yaml";

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("{} not found. Please create it with your tasks (try `roninctl init`)", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML: {message}")]
    Parse { message: String },

    #[error("configuration validation failed:\n- {}", join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    #[error("{} already exists. Delete it first or use a different path", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to serialize menu: {message}")]
    Serialize { message: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n- ")
}

/// One problem found while validating a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable position, e.g. `Category 'Database', Item 'Backup'`.
    /// Empty for document-level issues.
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub menu: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub container: String,
    #[serde(default)]
    pub command: String,
    /// Execution budget as a humantime duration (`45s`, `2m`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// Attach the operator's terminal instead of capturing output.
    #[serde(default, skip_serializing_if = "is_false")]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Task {
    pub fn timeout(&self) -> Result<Option<Duration>, humantime::DurationError> {
        self.timeout
            .as_deref()
            .map(humantime::parse_duration)
            .transpose()
    }
}

impl MenuConfig {
    /// Read, parse and validate the menu at `path`.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let raw = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                MenuError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                MenuError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let config = Self::from_yaml(&raw)?;
        debug!(
            project = %config.project,
            tasks = config.tasks().count(),
            "menu loaded"
        );
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, MenuError> {
        let config: MenuConfig = serde_yaml::from_str(raw).map_err(|e| MenuError::Parse {
            message: e.to_string(),
        })?;

        let issues = config.validate();
        if !issues.is_empty() {
            return Err(MenuError::Validation { issues });
        }
        Ok(config)
    }

    /// Every task, in menu order, with categories flattened away.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.menu.iter().flat_map(|category| category.items.iter())
    }

    pub fn find_task(&self, label: &str) -> Option<&Task> {
        self.tasks().find(|task| task.label == label)
    }

    pub fn to_yaml(&self) -> Result<String, MenuError> {
        serde_yaml::to_string(self).map_err(|e| MenuError::Serialize {
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), MenuError> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
