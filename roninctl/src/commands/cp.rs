use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::GlobalArgs;

#[derive(Args, Debug)]
pub struct CpArgs {
    /// Source: a local path or CONTAINER:PATH
    #[arg(value_name = "SRC")]
    pub source: String,

    /// Destination: a local path or CONTAINER:PATH
    #[arg(value_name = "DEST")]
    pub dest: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Location {
    Local(PathBuf),
    Container { name: String, path: String },
}

fn parse_location(raw: &str) -> Location {
    if let Some((name, path)) = raw.split_once(':') {
        let looks_local = name.is_empty() || name.contains('/') || name.starts_with('.');
        if !looks_local {
            return Location::Container {
                name: name.to_string(),
                path: path.to_string(),
            };
        }
    }
    Location::Local(PathBuf::from(raw))
}

pub fn run(args: CpArgs, global: &GlobalArgs) -> Result<i32> {
    let runtime = global.container_runtime();

    match (parse_location(&args.source), parse_location(&args.dest)) {
        (Location::Local(local), Location::Container { name, path }) => {
            runtime.copy_to(&name, &local, &path)?;
            println!("Copied {} to {}:{}", local.display(), name, path);
        }
        (Location::Container { name, path }, Location::Local(local)) => {
            runtime.copy_from(&name, &path, &local)?;
            println!("Copied {}:{} to {}", name, path, local.display());
        }
        (Location::Local(_), Location::Local(_)) => {
            bail!("One of SRC or DEST must be CONTAINER:PATH")
        }
        (Location::Container { .. }, Location::Container { .. }) => {
            bail!("Copying directly between two containers is not supported")
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_side_needs_a_plain_name_before_the_colon() {
        assert_eq!(
            parse_location("db1:/var/lib/dump.sql"),
            Location::Container {
                name: "db1".to_string(),
                path: "/var/lib/dump.sql".to_string()
            }
        );
        assert_eq!(
            parse_location("./backups/a:b.sql"),
            Location::Local(PathBuf::from("./backups/a:b.sql"))
        );
        assert_eq!(
            parse_location("/tmp/x"),
            Location::Local(PathBuf::from("/tmp/x"))
        );
        assert_eq!(
            parse_location(":/tmp/x"),
            Location::Local(PathBuf::from(":/tmp/x"))
        );
    }
}
