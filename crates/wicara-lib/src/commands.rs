//! Command executor — resolves a target name and launches it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use wicara_core::types::ActionResult;

use crate::config::CommandTable;
use crate::launcher::Launcher;
use crate::response_log::ResponseLog;

#[derive(Clone)]
pub struct CommandExecutor {
    table: Arc<CommandTable>,
    launcher: Arc<dyn Launcher>,
    log: ResponseLog,
}

impl CommandExecutor {
    pub fn new(table: Arc<CommandTable>, launcher: Arc<dyn Launcher>, log: ResponseLog) -> Self {
        Self {
            table,
            launcher,
            log,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Execute a command. Never waits for the launched program.
    pub fn execute(&self, target_name: &str) -> ActionResult {
        let result = match self.table.resolve(target_name) {
            None => ActionResult::NotFound(target_name.to_string()),
            Some(program) => match self.launcher.launch(program) {
                Ok(()) => ActionResult::Launched(target_name.to_string()),
                Err(e) => ActionResult::LaunchFailed(target_name.to_string(), e),
            },
        };

        match &result {
            ActionResult::Launched(name) => info!("command: launched {name}"),
            other => warn!("command: {other}"),
        }

        self.log
            .append_detached(format!("{}\t{result}", Utc::now().to_rfc3339()));
        result
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use wicara_core::error::LaunchError;

    /// Records launches; fails when `fail_with` is set.
    #[derive(Default)]
    pub(crate) struct RecordingLauncher {
        pub launched: Mutex<Vec<String>>,
        pub fail_with: Option<String>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, program: &str) -> Result<(), LaunchError> {
            self.launched.lock().unwrap().push(program.to_string());
            match &self.fail_with {
                Some(cause) => Err(LaunchError(cause.clone())),
                None => Ok(()),
            }
        }
    }

    fn executor(launcher: Arc<RecordingLauncher>, dir: &std::path::Path) -> CommandExecutor {
        CommandExecutor::new(
            Arc::new(CommandTable::from_pairs([("calculator", "calc")])),
            launcher,
            ResponseLog::new(dir.join("responses.log")),
        )
    }

    #[tokio::test]
    async fn known_target_is_launched() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Arc::new(RecordingLauncher::default());
        let result = executor(launcher.clone(), dir.path()).execute("calculator");

        assert_eq!(result, ActionResult::Launched("calculator".into()));
        assert_eq!(*launcher.launched.lock().unwrap(), vec!["calc"]);
    }

    #[tokio::test]
    async fn unknown_target_never_reaches_launcher() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Arc::new(RecordingLauncher::default());
        let exec = executor(launcher.clone(), dir.path());

        for name in ["paint", "Calculator", ""] {
            assert_eq!(exec.execute(name), ActionResult::NotFound(name.into()));
        }
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn launch_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = Arc::new(RecordingLauncher {
            fail_with: Some("permission denied".into()),
            ..Default::default()
        });
        let result = executor(launcher, dir.path()).execute("calculator");

        assert_eq!(
            result,
            ActionResult::LaunchFailed("calculator".into(), LaunchError("permission denied".into()))
        );
    }

    #[tokio::test]
    async fn every_outcome_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(Arc::new(RecordingLauncher::default()), dir.path());

        exec.execute("calculator");
        exec.execute("paint");

        let path = dir.path().join("responses.log");
        let mut contents = String::new();
        for _ in 0..50 {
            contents = std::fs::read_to_string(&path).unwrap_or_default();
            if contents.lines().count() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(contents.contains("\tlaunched calculator"));
        assert!(contents.contains("\tnot_found paint"));
    }
}
