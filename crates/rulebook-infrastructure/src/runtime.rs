//! Virtualenv rule runtime
//!
//! Rules run in a dedicated Python virtual environment, one interpreter
//! process per rule. The child runs a fixed bootstrap program and receives
//! the [`RuleInvocation`] as JSON on stdin, so nothing from a rule file or
//! the configuration ever becomes program text. The child's stdout is the
//! terminal's; its stderr is inherited as well so tracebacks stay visible.

use crate::config::ExecutionConfig;
use crate::constants::REQUIREMENTS_FILENAME;
use crate::error_ext::ErrorContext;
use crate::paths::RulebookPaths;
use async_trait::async_trait;
use rulebook_domain::error::{Error, Result};
use rulebook_domain::ports::RuleRuntime;
use rulebook_domain::RuleInvocation;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Program run by the environment's interpreter for every rule
pub const BOOTSTRAP: &str = r#"import importlib
import json
import sys

call = json.load(sys.stdin)
sys.path.insert(0, call["module_dir"])
module = importlib.import_module(call["module"])
getattr(module, call["function"])(**call["kwargs"])
"#;

/// [`RuleRuntime`] backed by a Python virtual environment
#[derive(Debug, Clone)]
pub struct VirtualEnvRuntime {
    paths: RulebookPaths,
    python: String,
    timeout: Option<Duration>,
}

impl VirtualEnvRuntime {
    /// Runtime using the environment under `paths`
    pub fn new(paths: RulebookPaths, execution: &ExecutionConfig) -> Self {
        Self {
            paths,
            python: execution.python.clone(),
            timeout: execution.timeout(),
        }
    }

    /// Interpreter inside the environment
    pub fn interpreter(&self) -> PathBuf {
        interpreter_in(&self.paths.venv_dir())
    }

    /// Whether the environment directory already exists
    pub fn is_provisioned(&self) -> bool {
        self.paths.venv_dir().is_dir()
    }

    /// Create the environment if it does not exist yet
    ///
    /// Returns `true` when a new environment was created.
    async fn ensure_environment(&self) -> Result<bool> {
        let venv = self.paths.venv_dir();
        if venv.is_dir() {
            debug!("Reusing environment at {}", venv.display());
            return Ok(false);
        }

        info!("Creating rule environment at {}", venv.display());
        let mut command = Command::new(&self.python);
        command.arg("-m").arg("venv").arg(&venv);
        if let Err(e) = run_quietly(command, &format!("{} -m venv", self.python)).await {
            self.discard_environment();
            return Err(e);
        }
        Ok(true)
    }

    /// Remove a half-built environment so the next run starts over
    fn discard_environment(&self) {
        let venv = self.paths.venv_dir();
        if venv.exists() {
            if let Err(e) = std::fs::remove_dir_all(&venv) {
                warn!(error = %e, "Failed to remove incomplete environment {}", venv.display());
            }
        }
    }

    async fn install_requirements(&self, source: &str) -> Result<()> {
        let requirements = self.paths.requirements_file(source);
        if !requirements.is_file() {
            debug!(source = %source, "No {} in source, nothing to install", REQUIREMENTS_FILENAME);
            return Ok(());
        }

        info!(source = %source, "Installing {}", requirements.display());
        let mut command = Command::new(self.interpreter());
        command
            .args(["-m", "pip", "install", "--quiet", "-r"])
            .arg(&requirements);
        run_quietly(command, "pip install").await
    }
}

#[async_trait]
impl RuleRuntime for VirtualEnvRuntime {
    async fn provision(&self, sources: &[String]) -> Result<()> {
        if !self.ensure_environment().await? {
            return Ok(());
        }
        for source in sources {
            if let Err(e) = self.install_requirements(source).await {
                self.discard_environment();
                return Err(e);
            }
        }
        Ok(())
    }

    async fn install_dependencies(&self, source: &str) -> Result<()> {
        let created = self.ensure_environment().await?;
        let installed = self.install_requirements(source).await;
        if installed.is_err() && created {
            self.discard_environment();
        }
        installed
    }

    async fn invoke(&self, invocation: &RuleInvocation) -> Result<()> {
        let payload = invocation.to_payload()?;
        let rule_id = invocation.rule_id.as_str();

        let mut child = Command::new(self.interpreter())
            .arg("-c")
            .arg(BOOTSTRAP)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::execution(rule_id, format!("failed to start interpreter: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .await
                .map_err(|e| Error::execution(rule_id, format!("failed to send invocation: {e}")))?;
        }

        let status = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status,
                    Err(_) => {
                        warn!(rule_id = %rule_id, "Rule exceeded its time budget, killing it");
                        if let Err(e) = child.kill().await {
                            warn!(rule_id = %rule_id, error = %e, "Failed to kill rule process");
                        }
                        return Err(Error::Timeout {
                            rule_id: rule_id.to_string(),
                            seconds: limit.as_secs(),
                        });
                    }
                }
            }
            None => child.wait().await,
        }
        .map_err(|e| Error::execution(rule_id, format!("failed to wait for interpreter: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::execution(rule_id, format!("interpreter {status}")))
        }
    }
}

/// Interpreter path inside a virtual environment
pub fn interpreter_in(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

/// Run a provisioning command, surfacing its stderr only on failure
async fn run_quietly(mut command: Command, label: &str) -> Result<()> {
    let output = command
        .stdin(Stdio::null())
        .output()
        .await
        .provisioning_context(format!("Failed to run {label}"))?;
    if output.status.success() {
        return Ok(());
    }
    Err(Error::provisioning(format!(
        "{label} failed ({}): {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    )))
}
