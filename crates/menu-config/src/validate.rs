use crate::{MenuConfig, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::time::Duration;

static ENV_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("environment name pattern must compile")
});

fn issue(location: impl Into<String>, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        location: location.into(),
        message: message.into(),
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl MenuConfig {
    /// Check the menu's structural rules, returning every violation found.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if blank(&self.project) {
            issues.push(issue("", "Project name is required"));
        }

        if self.menu.is_empty() {
            issues.push(issue("", "At least one menu category is required"));
        }

        let mut labels = HashSet::new();

        for (i, category) in self.menu.iter().enumerate() {
            if blank(&category.title) {
                issues.push(issue(format!("Category {}", i + 1), "title is required"));
            }

            let category_name = format!("Category '{}'", category.title);
            if category.items.is_empty() {
                issues.push(issue(&category_name, "at least one item is required"));
            }

            for (j, task) in category.items.iter().enumerate() {
                if blank(&task.label) {
                    issues.push(issue(
                        format!("{}, Item {}", category_name, j + 1),
                        "label is required",
                    ));
                } else if !labels.insert(task.label.as_str()) {
                    issues.push(issue(
                        format!("{}, Item '{}'", category_name, task.label),
                        "label is already used by another item",
                    ));
                }

                let location = format!("{}, Item '{}'", category_name, task.label);
                if blank(&task.container) {
                    issues.push(issue(&location, "container is required"));
                }
                if blank(&task.command) {
                    issues.push(issue(&location, "command is required"));
                }

                match task.timeout() {
                    Ok(Some(timeout)) if timeout == Duration::ZERO => {
                        issues.push(issue(&location, "timeout must be greater than zero"));
                    }
                    Ok(_) => {}
                    Err(err) => {
                        issues.push(issue(
                            &location,
                            format!(
                                "timeout '{}' is not a valid duration ({})",
                                task.timeout.as_deref().unwrap_or_default(),
                                err
                            ),
                        ));
                    }
                }

                for name in task.env.keys() {
                    if !ENV_NAME.is_match(name) {
                        issues.push(issue(
                            &location,
                            format!("env name '{}' is not a valid variable name", name),
                        ));
                    }
                }
            }
        }

        issues
    }
}
