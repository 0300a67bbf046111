use anyhow::Result;
use menu_config::{MenuConfig, MenuError};

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs) -> Result<i32> {
    match MenuConfig::load(&global.menu) {
        Ok(config) => {
            println!(
                "✓ Valid menu for project '{}' ({} categories, {} tasks)",
                config.project,
                config.menu.len(),
                config.tasks().count()
            );
            Ok(0)
        }
        Err(MenuError::Validation { issues }) => {
            println!("✗ {} is invalid:", global.menu.display());
            for issue in &issues {
                println!("  - {}", issue);
            }
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}
