//! Hand the chosen command over to the platform shell
//!
//! `cd:<dir>` opens an interactive shell in `<dir>`; anything else runs
//! through `sh -c` (or `cmd /C` on Windows). On Unix the launcher replaces
//! itself with the shell, elsewhere it waits for the child and passes its
//! exit code on.

use std::borrow::Cow;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Prefix marking a directory change
pub const CD_PREFIX: &str = "cd:";

/// Shell family of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    pub fn host() -> Self {
        if std::path::MAIN_SEPARATOR == '\\' {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// What a catalog command asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    ChangeDirectory(Cow<'a, str>),
    Shell(&'a str),
}

impl<'a> Request<'a> {
    /// Classify `command`, expanding variables with the process environment
    pub fn parse(command: &'a str) -> Self {
        Self::parse_with(command, |name| std::env::var(name).ok())
    }

    /// Classify `command`, resolving `$VAR` / `${VAR}` through `lookup`.
    /// Unknown variables expand to nothing.
    pub fn parse_with<F>(command: &'a str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match command.strip_prefix(CD_PREFIX) {
            Some(dir) => Self::ChangeDirectory(shellexpand::env_with_context_no_errors(dir, |name| {
                Some(lookup(name).unwrap_or_default())
            })),
            None => Self::Shell(command),
        }
    }
}

/// A concrete program and argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build the shell invocation for a request
    pub fn plan(request: &Request<'_>, platform: Platform) -> Self {
        match (request, platform) {
            (Request::ChangeDirectory(dir), Platform::Posix) => {
                Self::new("sh", &["-c", &format!("cd {dir} && exec $SHELL")])
            }
            (Request::ChangeDirectory(dir), Platform::Windows) => {
                Self::new("cmd", &["/K", &format!("cd /d {dir}")])
            }
            (Request::Shell(command), Platform::Posix) => Self::new("sh", &["-c", *command]),
            (Request::Shell(command), Platform::Windows) => Self::new("cmd", &["/C", *command]),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Run `command` in place of the launcher.
///
/// On Unix this only returns if the shell could not be started. Elsewhere
/// it returns the child's exit code for the caller to exit with.
pub fn dispatch(command: &str) -> Result<i32> {
    let request = Request::parse(command);
    let invocation = Invocation::plan(&request, Platform::host());
    debug!(program = %invocation.program, args = ?invocation.args, "dispatching");

    let exec_error = |source: std::io::Error| Error::Exec {
        command: command.to_string(),
        source,
    };

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        // exec only returns on failure
        let err = invocation.command().exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = invocation.command().status().map_err(exec_error)?;
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PROJECTS" => Some("/home/me/projects".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_plain_command_is_not_expanded() {
        let request = Request::parse_with("echo $PROJECTS", lookup);
        assert_eq!(request, Request::Shell("echo $PROJECTS"));
    }

    #[test]
    fn test_cd_expands_variables() {
        let request = Request::parse_with("cd:$PROJECTS/mash", lookup);
        assert_eq!(request, Request::ChangeDirectory("/home/me/projects/mash".into()));

        let request = Request::parse_with("cd:${PROJECTS}", lookup);
        assert_eq!(request, Request::ChangeDirectory("/home/me/projects".into()));
    }

    #[test]
    fn test_cd_unknown_variable_is_empty() {
        let request = Request::parse_with("cd:$NOPE/src", lookup);
        assert_eq!(request, Request::ChangeDirectory("/src".into()));
    }

    #[test]
    fn test_cd_prefix_is_case_sensitive() {
        assert_eq!(Request::parse_with("CD:/tmp", lookup), Request::Shell("CD:/tmp"));
        assert_eq!(Request::parse_with("cd /tmp", lookup), Request::Shell("cd /tmp"));
    }

    #[test]
    fn test_plan_posix() {
        let shell = Invocation::plan(&Request::Shell("make build"), Platform::Posix);
        assert_eq!(shell, Invocation::new("sh", &["-c", "make build"]));

        let cd = Invocation::plan(&Request::ChangeDirectory("/tmp".into()), Platform::Posix);
        assert_eq!(cd, Invocation::new("sh", &["-c", "cd /tmp && exec $SHELL"]));
    }

    #[test]
    fn test_plan_windows() {
        let shell = Invocation::plan(&Request::Shell("dir"), Platform::Windows);
        assert_eq!(shell, Invocation::new("cmd", &["/C", "dir"]));

        let cd = Invocation::plan(&Request::ChangeDirectory(r"C:\work".into()), Platform::Windows);
        assert_eq!(cd, Invocation::new("cmd", &["/K", r"cd /d C:\work"]));
    }

    #[test]
    fn test_host_platform_matches_separator() {
        let expected = if cfg!(windows) { Platform::Windows } else { Platform::Posix };
        assert_eq!(Platform::host(), expected);
    }

    #[test]
    fn test_command_carries_invocation() {
        let invocation = Invocation::new("sh", &["-c", "true"]);
        let cmd = invocation.command();
        assert_eq!(cmd.get_program(), "sh");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["-c", "true"]);
    }
}
