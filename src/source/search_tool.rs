//! External search tool invocation.
//!
//! The tool runs case-insensitively and recursively over documents with the
//! corpus extension, matching the query as a fixed string. Its stdout is
//! returned as raw lines of the form `path:line:text`.

use crate::model::SearchError;
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;
use tracing::{debug, info};

/// Exit code both grep and ripgrep use for "ran fine, nothing matched".
const EXIT_NO_MATCHES: i32 = 1;

/// Skips `.git`, `.obsidian`, `.trash` and the like; `rg` does so by default.
const HIDDEN_DIRS: &str = "--exclude-dir=.[!.]*";

/// A line-oriented text search utility.
pub trait SearchTool {
    /// Program name, for diagnostics.
    fn program(&self) -> &str;

    /// Run the search and return raw output lines.
    ///
    /// A run that finds nothing returns an empty vector, not an error.
    fn search(&self, query: &str, root: &Path, extension: &str)
        -> Result<Vec<String>, SearchError>;
}

/// Supported search programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SearchToolKind {
    /// POSIX/GNU `grep`.
    #[default]
    #[serde(rename = "grep")]
    Grep,
    /// ripgrep (`rg`).
    #[serde(rename = "rg", alias = "ripgrep")]
    Ripgrep,
}

impl SearchToolKind {
    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            SearchToolKind::Grep => "grep",
            SearchToolKind::Ripgrep => "rg",
        }
    }
}

impl FromStr for SearchToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grep" => Ok(SearchToolKind::Grep),
            "rg" | "ripgrep" => Ok(SearchToolKind::Ripgrep),
            other => Err(format!("unknown search tool '{other}' (expected grep or rg)")),
        }
    }
}

/// Search tool backed by a child process.
#[derive(Debug, Clone, Default)]
pub struct CommandSearchTool {
    kind: SearchToolKind,
}

impl CommandSearchTool {
    /// Create a tool for the given program.
    pub fn new(kind: SearchToolKind) -> Self {
        Self { kind }
    }

    /// Build the command line without running it.
    pub fn command(&self, query: &str, root: &Path, extension: &str) -> Command {
        let glob = format!("*.{extension}");
        let mut cmd = Command::new(self.kind.program());

        match self.kind {
            SearchToolKind::Grep => {
                // Searching "." from inside the root keeps a hidden root
                // directory from matching the exclusion below.
                cmd.current_dir(root)
                    .args(["-r", "-n", "-i", "-I", "-F"])
                    .arg(format!("--include={glob}"))
                    .arg(HIDDEN_DIRS)
                    .arg("-e")
                    .arg(query)
                    .arg(".");
            }
            SearchToolKind::Ripgrep => {
                cmd.args([
                    "--no-heading",
                    "--with-filename",
                    "--line-number",
                    "--ignore-case",
                    "--fixed-strings",
                    "--color",
                    "never",
                    "--glob",
                ])
                .arg(glob)
                .arg("-e")
                .arg(query)
                .arg(root);
            }
        }

        cmd
    }
}

impl SearchTool for CommandSearchTool {
    fn program(&self) -> &str {
        self.kind.program()
    }

    fn search(
        &self,
        query: &str,
        root: &Path,
        extension: &str,
    ) -> Result<Vec<String>, SearchError> {
        let program = self.program().to_string();
        if !root.is_dir() {
            return Err(SearchError::MissingRoot {
                root: root.to_path_buf(),
            });
        }
        info!(program = %program, query, root = %root.display(), "Running search tool");

        let output = self
            .command(query, root, extension)
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => SearchError::ToolNotFound {
                    program: program.clone(),
                },
                _ => SearchError::Spawn {
                    program: program.clone(),
                    source,
                },
            })?;

        interpret_output(
            &program,
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Turn a finished search process into output lines or an error.
///
/// Exit 0 yields the stdout lines, exit 1 ("no matches") yields an empty
/// vector, anything else is a failure.
pub fn interpret_output(
    program: &str,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<Vec<String>, SearchError> {
    match code {
        Some(0) => {
            let lines: Vec<String> = stdout
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            debug!(program, lines = lines.len(), "Search tool finished");
            Ok(lines)
        }
        Some(EXIT_NO_MATCHES) => {
            debug!(program, "Search tool reported no matches");
            Ok(Vec::new())
        }
        code => Err(SearchError::Failed {
            program: program.to_string(),
            code,
            stderr: stderr.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn kind_parses_known_names() {
        assert_eq!("grep".parse::<SearchToolKind>(), Ok(SearchToolKind::Grep));
        assert_eq!("rg".parse::<SearchToolKind>(), Ok(SearchToolKind::Ripgrep));
        assert_eq!(
            "ripgrep".parse::<SearchToolKind>(),
            Ok(SearchToolKind::Ripgrep)
        );
        assert!("ack".parse::<SearchToolKind>().is_err());
    }

    #[test]
    fn grep_command_is_recursive_case_insensitive_and_restricted() {
        let tool = CommandSearchTool::new(SearchToolKind::Grep);
        let cmd = tool.command("needle", Path::new("/vault"), "md");
        assert_eq!(cmd.get_program(), OsStr::new("grep"));

        let args = args_of(&cmd);
        assert!(args.contains(&"-r".to_string()));
        assert!(args.contains(&"-i".to_string()));
        assert!(args.contains(&"-n".to_string()));
        assert!(args.contains(&"--include=*.md".to_string()));
        assert_eq!(args[args.len() - 2], "needle");
        assert_eq!(args[args.len() - 1], ".");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/vault")));
    }

    #[test]
    fn grep_skips_hidden_directories() {
        let tool = CommandSearchTool::new(SearchToolKind::Grep);
        let args = args_of(&tool.command("needle", Path::new("/vault"), "md"));
        assert!(args.contains(&"--exclude-dir=.[!.]*".to_string()));
    }

    #[test]
    fn missing_root_is_reported_before_spawning() {
        let tool = CommandSearchTool::new(SearchToolKind::Grep);
        let err = tool
            .search("needle", Path::new("/definitely/not/a/vault"), "md")
            .unwrap_err();
        assert!(matches!(err, SearchError::MissingRoot { .. }));
    }

    #[test]
    fn query_is_passed_after_dash_e() {
        let tool = CommandSearchTool::new(SearchToolKind::Grep);
        let args = args_of(&tool.command("-v", Path::new("."), "md"));
        let e = args.iter().position(|a| a == "-e").unwrap();
        assert_eq!(args[e + 1], "-v");
    }

    #[test]
    fn ripgrep_command_uses_glob_and_filenames() {
        let tool = CommandSearchTool::new(SearchToolKind::Ripgrep);
        let cmd = tool.command("needle", Path::new("notes"), "txt");
        assert_eq!(cmd.get_program(), OsStr::new("rg"));

        let args = args_of(&cmd);
        assert!(args.contains(&"--with-filename".to_string()));
        assert!(args.contains(&"--ignore-case".to_string()));
        assert!(args.contains(&"*.txt".to_string()));
    }

    #[test]
    fn exit_zero_returns_non_empty_lines() {
        let lines = interpret_output("grep", Some(0), "a.md:1:x\n\nb.md:2:y\n", "").unwrap();
        assert_eq!(lines, vec!["a.md:1:x", "b.md:2:y"]);
    }

    #[test]
    fn exit_one_means_no_matches() {
        let lines = interpret_output("grep", Some(1), "", "").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn exit_two_is_failure_with_stderr() {
        let err = interpret_output("grep", Some(2), "a.md:1:x\n", "grep: boom\n").unwrap_err();
        match err {
            SearchError::Failed {
                program,
                code,
                stderr,
            } => {
                assert_eq!(program, "grep");
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "grep: boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn killed_process_is_failure() {
        assert!(interpret_output("rg", None, "", "").is_err());
    }
}
