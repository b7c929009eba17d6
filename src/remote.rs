//! Remote sync client: a thin wrapper around the Transifex CLI.
//!
//! Authentication and partial-write handling belong to the external tool;
//! this module only probes that the tool is usable and surfaces its failures
//! with remediation hints.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, bail};

pub struct RemoteClient {
    tool: String,
    project_root: PathBuf,
}

impl RemoteClient {
    pub fn new(tool: &str, project_root: &Path) -> Self {
        Self {
            tool: tool.to_string(),
            project_root: project_root.to_path_buf(),
        }
    }

    /// Probe that the CLI is installed and authenticated for this project.
    ///
    /// Both probes are harmless read-only invocations. Any failure is a
    /// configuration error with a remediation hint, never a panic.
    pub fn validate_environment(&self) -> Result<()> {
        let version = Command::new(&self.tool).arg("--version").output();
        match version {
            Ok(output) if output.status.success() => {}
            _ => bail!(
                "Transifex CLI ('{}') not installed.\n\
                 Hint: Install with: pip install transifex-client",
                self.tool
            ),
        }

        let status = Command::new(&self.tool)
            .arg("status")
            .current_dir(&self.project_root)
            .output()
            .with_context(|| format!("Failed to run '{} status'", self.tool))?;
        if !status.status.success() {
            bail!(
                "Not authenticated with Transifex for this project.\n\
                 Hint: Run: {} init",
                self.tool
            );
        }

        Ok(())
    }

    /// Pull all resources above the minimum completion threshold.
    ///
    /// The tool writes directly into the translations directory; a non-zero
    /// exit is reported with its stderr and fails the pipeline.
    pub fn pull(&self, minimum_completion: u8) -> Result<()> {
        let output = Command::new(&self.tool)
            .args([
                "pull",
                "-a",
                &format!("--minimum-perc={}", minimum_completion),
            ])
            .current_dir(&self.project_root)
            .output()
            .with_context(|| format!("Failed to run '{} pull'", self.tool))?;

        if !output.status.success() {
            bail!(
                "Failed to pull translations:\n{}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt};
    use tempfile::tempdir;

    /// Write a fake `tx` executable that logs its arguments and exits with
    /// the given code.
    fn fake_tool(dir: &Path, exit_code: i32) -> String {
        let path = dir.join("tx");
        fs::write(
            &path,
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}\"\necho boom >&2\nexit {}\n",
                dir.join("calls.log").display(),
                exit_code
            ),
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_tool_reports_install_hint() {
        let dir = tempdir().unwrap();
        let client = RemoteClient::new("/nonexistent/tx", dir.path());
        let err = client.validate_environment().unwrap_err().to_string();
        assert!(err.contains("not installed"));
        assert!(err.contains("pip install transifex-client"));
    }

    #[test]
    fn test_unauthenticated_reports_init_hint() {
        let dir = tempdir().unwrap();
        let tool = fake_tool(dir.path(), 1);
        // --version also fails with a failing fake, which reads as "not
        // installed"; make the probe pass by using exit 0 for --version only.
        fs::write(
            &tool,
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then exit 0; fi\nexit 1\n",
        )
        .unwrap();
        let client = RemoteClient::new(&tool, dir.path());
        let err = client.validate_environment().unwrap_err().to_string();
        assert!(err.contains("Not authenticated"));
        assert!(err.contains("init"));
    }

    #[test]
    fn test_validate_environment_passes() {
        let dir = tempdir().unwrap();
        let tool = fake_tool(dir.path(), 0);
        let client = RemoteClient::new(&tool, dir.path());
        assert!(client.validate_environment().is_ok());
    }

    #[test]
    fn test_pull_passes_threshold() {
        let dir = tempdir().unwrap();
        let tool = fake_tool(dir.path(), 0);
        let client = RemoteClient::new(&tool, dir.path());
        client.pull(30).unwrap();

        let log = fs::read_to_string(dir.path().join("calls.log")).unwrap();
        assert!(log.contains("pull -a --minimum-perc=30"));
    }

    #[test]
    fn test_pull_failure_surfaces_stderr() {
        let dir = tempdir().unwrap();
        let tool = fake_tool(dir.path(), 2);
        let client = RemoteClient::new(&tool, dir.path());
        let err = client.pull(30).unwrap_err().to_string();
        assert!(err.contains("Failed to pull translations"));
        assert!(err.contains("boom"));
    }
}
