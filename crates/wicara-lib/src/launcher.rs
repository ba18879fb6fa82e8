//! Process launcher — fire-and-forget spawn of external programs.

use std::process::Stdio;

use tracing::info;

use wicara_core::error::LaunchError;

/// External process launcher.
///
/// The only observable result is whether the launch request was accepted;
/// the launched program's lifetime is not tracked.
pub trait Launcher: Send + Sync {
    fn launch(&self, program: &str) -> Result<(), LaunchError>;
}

/// Spawns programs through `tokio::process`, detached from our stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str) -> Result<(), LaunchError> {
        let child = tokio::process::Command::new(program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError(format!("failed to spawn {program}: {e}")))?;

        info!("launcher: started {program} (pid {:?})", child.id());
        // Dropping the handle neither kills nor waits; tokio reaps it.
        drop(child);
        Ok(())
    }
}
