use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated environment for one test: its own working directory, home and
/// data directory.
pub struct IssuesWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
    pub data_dir: PathBuf,
}

impl IssuesWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().join("work");
        let home = temp_dir.path().join("home");
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(&root).expect("work dir");
        std::fs::create_dir_all(&home).expect("home dir");
        Self {
            temp_dir,
            root,
            home,
            data_dir,
        }
    }

    /// Path of a project's document.
    pub fn project_file(&self, project: &str) -> PathBuf {
        self.data_dir.join("issues").join(format!("{project}.json"))
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }

    pub fn stderr_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stderr)
            .unwrap_or_else(|e| panic!("stderr is not JSON ({e}): {}", self.stderr))
    }
}

/// Command for the binary, isolated to `workspace`.
pub fn cli_command(workspace: &IssuesWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("ag-issues").expect("ag-issues binary");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.home)
        .env("AG_ISSUES_CONFIG", workspace.home.join("absent.yaml"))
        .env("AG_ISSUES_DATA_DIR", &workspace.data_dir)
        .env("AG_ISSUES_AUTHOR", "tester")
        .env("NO_COLOR", "1")
        .env_remove("AG_ISSUES_PROJECT")
        .env_remove("AG_ISSUES_PROJECTS_DIR")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_cli<I, S>(workspace: &IssuesWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_cli_with_stdin(workspace, args, "", label)
}

pub fn run_cli_with_stdin<I, S>(
    workspace: &IssuesWorkspace,
    args: I,
    input: &str,
    label: &str,
) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = cli_command(workspace);
    cmd.args(args).write_stdin(input);

    let output = cmd.output().expect("run ag-issues");
    let result = RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] exit {:?}\n{}", result.code(), result.stderr);
    }
    result
}
