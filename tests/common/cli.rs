use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Date stamped on submissions made through the test harness.
pub const TODAY: &str = "2026-03-15";

/// Isolated working directory with no user config in reach.
pub struct GpWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl GpWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join("xdg")).expect("xdg dir");
        Self { temp_dir, root }
    }

    /// Write a file relative to the workspace root and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

fn command(workspace: &GpWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("gp").expect("gp binary");
    cmd.current_dir(workspace.root())
        .env("HOME", workspace.root())
        .env("XDG_CONFIG_HOME", workspace.path("xdg"))
        .env("GORODPLUS_TODAY", TODAY)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("GORODPLUS_DEFAULT_CATEGORY")
        .env_remove("GORODPLUS_PROFILE_LIMIT")
        .env_remove("GORODPLUS_MAP_ZOOM");
    cmd
}

fn finish(label: &str, output: &std::process::Output) -> CmdOutput {
    let result = CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    eprintln!(
        "[{label}] status={} stdout={} bytes stderr={}",
        result.status,
        result.stdout.len(),
        result.stderr.trim()
    );
    result
}

/// Run `gp` in the workspace.
pub fn run_gp<I, S>(workspace: &GpWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(workspace).args(args).output().expect("run gp");
    finish(label, &output)
}

/// Run `gp` with `stdin` piped in.
pub fn run_gp_with_stdin<I, S>(
    workspace: &GpWorkspace,
    args: I,
    stdin: &str,
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(workspace)
        .args(args)
        .write_stdin(stdin.to_string())
        .output()
        .expect("run gp");
    finish(label, &output)
}
