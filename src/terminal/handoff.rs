//! Handing the terminal to an external editor.
//!
//! The session is suspended before the editor starts and resumed after it
//! exits, whatever its exit status. The editor inherits stdin, stdout and
//! stderr so it has full control of the terminal in the meantime.

use super::{TerminalMode, TerminalSession};
use crate::model::EditorError;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Editor program plus leading arguments, e.g. `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Split a shell-style command string.
    pub fn parse(command: &str) -> Result<Self, EditorError> {
        let words = shell_words::split(command).map_err(|e| EditorError::InvalidCommand {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let mut words = words.into_iter();
        let program = words.next().ok_or_else(|| EditorError::InvalidCommand {
            command: command.to_string(),
            reason: "empty command".to_string(),
        })?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Executable name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the file path.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// How an editor process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorExit {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
}

impl EditorExit {
    /// Whether the editor exited with status 0.
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

/// Starts an editor on a file and blocks until it exits.
pub trait EditorLauncher {
    /// Run `command` with `path` appended, inheriting the terminal.
    fn launch(&mut self, command: &EditorCommand, path: &Path) -> io::Result<EditorExit>;
}

/// Launches editors as child processes.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl EditorLauncher for ProcessLauncher {
    fn launch(&mut self, command: &EditorCommand, path: &Path) -> io::Result<EditorExit> {
        let status = Command::new(command.program())
            .args(command.args())
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(EditorExit {
            code: status.code(),
        })
    }
}

/// Opens documents in the configured editor around a suspended session.
pub struct EditorHandoff {
    command: EditorCommand,
    launcher: Box<dyn EditorLauncher>,
}

impl EditorHandoff {
    /// Create a handoff using `launcher` to run `command`.
    pub fn new(command: EditorCommand, launcher: Box<dyn EditorLauncher>) -> Self {
        Self { command, launcher }
    }

    /// The configured editor command.
    pub fn command(&self) -> &EditorCommand {
        &self.command
    }

    /// Suspend the session, run the editor on `path`, resume the session.
    ///
    /// The session is resumed before any editor failure is reported.
    ///
    /// # Errors
    ///
    /// `EditorError::Terminal` if the session cannot be suspended or resumed
    /// (fatal); `Launch` / `NonZeroExit` for editor failures (non-fatal).
    pub fn open<M: TerminalMode>(
        &mut self,
        session: &mut TerminalSession<M>,
        path: &Path,
    ) -> Result<(), EditorError> {
        let guard = session.suspend()?;

        info!(editor = %self.command.program, path = %path.display(), "Launching editor");
        let launched = self.launcher.launch(&self.command, path);

        guard.resume()?;

        let exit = launched.map_err(|source| EditorError::Launch {
            program: self.command.program.clone(),
            source,
        })?;

        if !exit.success() {
            warn!(editor = %self.command.program, code = ?exit.code, "Editor exited unsuccessfully");
            return Err(EditorError::NonZeroExit {
                program: self.command.program.clone(),
                code: exit.code,
            });
        }

        info!(editor = %self.command.program, "Editor exited");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording editor launcher.

    use super::{EditorCommand, EditorExit, EditorLauncher};
    use crate::terminal::testing::CallLog;
    use std::io;
    use std::path::Path;

    /// Records launches into a shared call log and returns a canned result.
    pub struct RecordingLauncher {
        pub log: CallLog,
        pub exit_code: Option<i32>,
        pub not_found: bool,
    }

    impl RecordingLauncher {
        pub fn new(log: CallLog, exit_code: Option<i32>) -> Self {
            Self {
                log,
                exit_code,
                not_found: false,
            }
        }
    }

    impl EditorLauncher for RecordingLauncher {
        fn launch(&mut self, command: &EditorCommand, path: &Path) -> io::Result<EditorExit> {
            self.log
                .borrow_mut()
                .push(format!("spawn {} {}", command.program(), path.display()));
            if self.not_found {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(EditorExit {
                code: self.exit_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingLauncher;
    use super::*;
    use crate::terminal::testing::{CallLog, RecordingMode};

    fn handoff(log: &CallLog, exit_code: Option<i32>) -> EditorHandoff {
        EditorHandoff::new(
            EditorCommand::parse("nvim").unwrap(),
            Box::new(RecordingLauncher::new(log.clone(), exit_code)),
        )
    }

    fn session(log: &CallLog) -> TerminalSession<RecordingMode> {
        TerminalSession::start(RecordingMode::with_log(log.clone())).unwrap()
    }

    #[test]
    fn parse_splits_program_and_args() {
        let cmd = EditorCommand::parse("code --wait 'new window'").unwrap();
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), ["--wait".to_string(), "new window".to_string()]);
    }

    #[test]
    fn parse_rejects_empty_and_unbalanced_commands() {
        assert!(matches!(
            EditorCommand::parse("   "),
            Err(EditorError::InvalidCommand { .. })
        ));
        assert!(matches!(
            EditorCommand::parse("vim 'oops"),
            Err(EditorError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn raw_mode_released_before_spawn_and_restored_once_after() {
        let log = CallLog::default();
        let mut session = session(&log);
        let mut handoff = handoff(&log, Some(0));

        handoff.open(&mut session, Path::new("/vault/a.md")).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            ["enter", "leave", "spawn nvim /vault/a.md", "enter"]
        );
        assert!(session.is_interactive());
    }

    #[test]
    fn non_zero_exit_still_restores_raw_mode() {
        let log = CallLog::default();
        let mut session = session(&log);
        let mut handoff = handoff(&log, Some(3));

        let err = handoff
            .open(&mut session, Path::new("/vault/a.md"))
            .unwrap_err();

        assert!(matches!(err, EditorError::NonZeroExit { code: Some(3), .. }));
        assert!(!err.is_fatal());
        assert_eq!(
            log.borrow().as_slice(),
            ["enter", "leave", "spawn nvim /vault/a.md", "enter"]
        );
    }

    #[test]
    fn signal_exit_is_reported() {
        let log = CallLog::default();
        let mut session = session(&log);
        let mut handoff = handoff(&log, None);

        let err = handoff.open(&mut session, Path::new("a.md")).unwrap_err();
        assert!(matches!(err, EditorError::NonZeroExit { code: None, .. }));
    }

    #[test]
    fn missing_editor_still_restores_raw_mode() {
        let log = CallLog::default();
        let mut session = session(&log);
        let mut launcher = RecordingLauncher::new(log.clone(), Some(0));
        launcher.not_found = true;
        let mut handoff =
            EditorHandoff::new(EditorCommand::parse("nope").unwrap(), Box::new(launcher));

        let err = handoff.open(&mut session, Path::new("a.md")).unwrap_err();

        assert!(matches!(err, EditorError::Launch { .. }));
        assert!(session.is_interactive());
        assert_eq!(log.borrow().last().map(String::as_str), Some("enter"));
    }

    #[test]
    fn failed_resume_is_fatal() {
        let log = CallLog::default();
        let mut mode = RecordingMode::with_log(log.clone());
        mode.fail_enter_after = Some(1);
        let mut session = TerminalSession::start(mode).unwrap();
        let mut handoff = handoff(&log, Some(0));

        let err = handoff.open(&mut session, Path::new("a.md")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn exit_success_only_for_zero() {
        assert!(EditorExit { code: Some(0) }.success());
        assert!(!EditorExit { code: Some(1) }.success());
        assert!(!EditorExit { code: None }.success());
    }
}
