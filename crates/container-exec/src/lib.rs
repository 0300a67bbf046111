//! # container-exec
//!
//! Run shell commands inside already-running containers through a container
//! runtime CLI (`docker` by default), with every operation gated by a fresh
//! verification of the target container.
//!
//! ```no_run
//! use container_exec::{ContainerRuntime, ExecRequest};
//! use std::time::Duration;
//!
//! let runtime = ContainerRuntime::from_env();
//! let result = runtime.run(
//!     &ExecRequest::new("my-database", "psql --version")
//!         .with_timeout(Duration::from_secs(10))
//!         .with_env([("PGUSER", "postgres")]),
//! )?;
//! println!("{} (exit {})", result.stdout, result.exit_code);
//! # Ok::<(), container_exec::ExecError>(())
//! ```
//!
//! Failures are classified by [`ErrorKind`]: requests rejected before
//! anything is spawned, an unreachable runtime, a missing or stopped
//! container, and runtime calls that could not complete (including
//! timeouts). A command exiting non-zero is not an error; it is reported
//! in [`ExecutionResult::exit_code`].

mod error;
mod exec;
mod interactive;
mod inventory;
mod process;
mod runtime;
mod transfer;
mod verify;

pub use error::{ErrorKind, ExecError, Result};
pub use exec::{ExecRequest, ExecutionResult, DEFAULT_EXEC_TIMEOUT};
pub use runtime::{ContainerRuntime, DEFAULT_RUNTIME, RUNTIME_ENV_VAR};
