use anyhow::Result;
use container_exec::ErrorKind;
use std::collections::BTreeSet;
use tabled::{settings::style::Style, Table, Tabled};
use tracing::debug;

use super::load_menu;
use crate::render::Palette;
use crate::GlobalArgs;

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "CONTAINER")]
    container: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

fn status_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ContainerNotFound => "missing",
        ErrorKind::ContainerNotRunning => "stopped",
        ErrorKind::RuntimeUnavailable => "runtime down",
        ErrorKind::Precondition => "invalid",
        ErrorKind::Spawn => "error",
    }
}

pub fn run(global: &GlobalArgs) -> Result<i32> {
    let palette = Palette::detect();
    let runtime = global.container_runtime();

    if !runtime.is_available() {
        println!(
            "{}",
            palette.error(&format!(
                "✗ Container runtime '{}' is not running or not accessible",
                runtime.display_name()
            ))
        );
        return Ok(1);
    }
    println!(
        "{}",
        palette.success(&format!("✓ Container runtime '{}' is available", runtime.display_name()))
    );

    let config = load_menu(global)?;
    let containers: BTreeSet<&str> = config.tasks().map(|t| t.container.as_str()).collect();

    let mut failures = 0;
    let rows: Vec<CheckRow> = containers
        .into_iter()
        .map(|container| match runtime.verify(container) {
            Ok(()) => CheckRow {
                container: container.to_string(),
                status: "running".to_string(),
                detail: String::new(),
            },
            Err(err) => {
                debug!(container, code = err.code(), "verification failed");
                failures += 1;
                CheckRow {
                    container: container.to_string(),
                    status: status_label(err.kind()).to_string(),
                    detail: err.to_string(),
                }
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No containers referenced by {}", global.menu.display());
        return Ok(0);
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if failures > 0 {
        println!(
            "{}",
            palette.warning(&format!("{} container(s) need attention", failures))
        );
        return Ok(1);
    }
    Ok(0)
}
