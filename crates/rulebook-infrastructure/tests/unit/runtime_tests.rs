//! Virtualenv runtime tests
//!
//! A shell script stands in for the environment's interpreter. Only the
//! bootstrap test uses the host's `python3`, and it is skipped without one.

use crate::test_utils::{temp_dir, write_file};
use rulebook_domain::ports::RuleRuntime;
use rulebook_domain::{Error, RuleInvocation};
use rulebook_infrastructure::config::ExecutionConfig;
use rulebook_infrastructure::runtime::{BOOTSTRAP, interpreter_in};
use rulebook_infrastructure::{RulebookPaths, VirtualEnvRuntime};
use serde_json::json;
use std::path::{Path, PathBuf};

fn invocation(rule_id: &str) -> RuleInvocation {
    RuleInvocation {
        rule_id: rule_id.to_string(),
        module_dir: PathBuf::from("/cache/abc/docs-ruleset"),
        module: "readme".to_string(),
        function: "readme_exists".to_string(),
        kwargs: json!({"project_dir": "/work", "strict": true})
            .as_object()
            .cloned()
            .unwrap(),
    }
}

fn execution(python: &str, timeout_secs: u64) -> ExecutionConfig {
    ExecutionConfig {
        python: python.to_string(),
        timeout_secs,
    }
}

/// Install a fake interpreter running `body` into the environment below `root`
#[cfg(unix)]
fn fake_interpreter(root: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let paths = RulebookPaths::new(root);
    let interpreter = interpreter_in(&paths.venv_dir());
    let relative = interpreter.strip_prefix(root).unwrap().to_string_lossy().into_owned();
    write_file(root, &relative, &format!("#!/bin/sh\n{body}\n"));
    std::fs::set_permissions(&interpreter, std::fs::Permissions::from_mode(0o755)).unwrap();
    interpreter
}

#[test]
fn test_bootstrap_reads_invocation_from_stdin() {
    assert!(BOOTSTRAP.contains("json.load(sys.stdin)"));
    assert!(BOOTSTRAP.contains("importlib.import_module"));
    assert!(BOOTSTRAP.contains("**call[\"kwargs\"]"));
}

#[test]
fn test_interpreter_location() {
    let venv = Path::new("/env");
    let interpreter = interpreter_in(venv);
    assert!(interpreter.starts_with(venv));
    assert!(
        interpreter.ends_with("bin/python") || interpreter.ends_with("Scripts/python.exe")
    );
}

#[tokio::test]
async fn test_existing_environment_is_reused() {
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    std::fs::create_dir_all(paths.venv_dir()).unwrap();

    let runtime = VirtualEnvRuntime::new(paths, &execution("/nonexistent/python", 0));

    assert!(runtime.is_provisioned());
    runtime.provision(&["./rules".to_string()]).await.unwrap();
}

#[tokio::test]
async fn test_failed_creation_is_a_provisioning_error() {
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    let runtime = VirtualEnvRuntime::new(paths.clone(), &execution("/nonexistent/python", 0));

    let err = runtime.provision(&[]).await.unwrap_err();

    assert!(matches!(err, Error::Provisioning { .. }));
    assert!(!paths.venv_dir().exists());
}

#[tokio::test]
async fn test_missing_requirements_installs_nothing() {
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    std::fs::create_dir_all(paths.venv_dir()).unwrap();

    let runtime = VirtualEnvRuntime::new(paths, &execution("/nonexistent/python", 0));
    runtime.install_dependencies("./rules").await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_invoke_sends_payload_on_stdin() {
    let root = temp_dir();
    let capture = root.path().join("payload.json");
    fake_interpreter(
        root.path(),
        &format!("cat > '{}'\nexit 0", capture.display()),
    );
    let runtime =
        VirtualEnvRuntime::new(RulebookPaths::new(root.path()), &execution("python3", 10));

    runtime.invoke(&invocation("docs.readme")).await.unwrap();

    let sent: RuleInvocation =
        serde_json::from_slice(&std::fs::read(capture).unwrap()).unwrap();
    assert_eq!(sent, invocation("docs.readme"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_invoke_passes_bootstrap_as_program() {
    let root = temp_dir();
    let capture = root.path().join("args.txt");
    fake_interpreter(
        root.path(),
        &format!("printf '%s' \"$2\" > '{}'\ncat > /dev/null", capture.display()),
    );
    let runtime =
        VirtualEnvRuntime::new(RulebookPaths::new(root.path()), &execution("python3", 10));

    runtime.invoke(&invocation("docs.readme")).await.unwrap();

    assert_eq!(std::fs::read_to_string(capture).unwrap(), BOOTSTRAP);
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_zero_exit_is_an_execution_error() {
    let root = temp_dir();
    fake_interpreter(root.path(), "cat > /dev/null\nexit 3");
    let runtime =
        VirtualEnvRuntime::new(RulebookPaths::new(root.path()), &execution("python3", 10));

    let err = runtime.invoke(&invocation("docs.readme")).await.unwrap_err();

    match err {
        Error::Execution { rule_id, .. } => assert_eq!(rule_id, "docs.readme"),
        other => panic!("Expected Execution, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_hung_rule_times_out() {
    let root = temp_dir();
    fake_interpreter(root.path(), "exec sleep 30");
    let runtime =
        VirtualEnvRuntime::new(RulebookPaths::new(root.path()), &execution("python3", 1));

    let err = runtime.invoke(&invocation("slow.rule")).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Timeout { ref rule_id, seconds: 1 } if rule_id == "slow.rule"
    ));
}

#[tokio::test]
async fn test_missing_interpreter_is_an_execution_error() {
    let root = temp_dir();
    let runtime =
        VirtualEnvRuntime::new(RulebookPaths::new(root.path()), &execution("python3", 10));

    let err = runtime.invoke(&invocation("docs.readme")).await.unwrap_err();
    assert!(matches!(err, Error::Execution { .. }));
}

/// Write an executable shell script at `root/relative`
#[cfg(unix)]
fn shell_script(root: &Path, relative: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_file(root, relative, &format!("#!/bin/sh\n{body}\n"));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_install_discards_new_environment() {
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    // `python -m venv <dir>` yields an environment whose pip always fails
    let host = shell_script(
        root.path(),
        "host/python",
        "mkdir -p \"$3/bin\"\nprintf '#!/bin/sh\\nexit 1\\n' > \"$3/bin/python\"\nchmod +x \"$3/bin/python\"",
    );
    let requirements = paths.requirements_file("./rules");
    let relative = requirements.strip_prefix(root.path()).unwrap().to_string_lossy().into_owned();
    write_file(root.path(), &relative, "requests\n");
    let runtime =
        VirtualEnvRuntime::new(paths.clone(), &execution(&host.to_string_lossy(), 0));

    let err = runtime.install_dependencies("./rules").await.unwrap_err();

    assert!(matches!(err, Error::Provisioning { .. }));
    assert!(!paths.venv_dir().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_install_keeps_existing_environment() {
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    fake_interpreter(root.path(), "exit 1");
    let requirements = paths.requirements_file("./rules");
    let relative = requirements.strip_prefix(root.path()).unwrap().to_string_lossy().into_owned();
    write_file(root.path(), &relative, "requests\n");
    let runtime = VirtualEnvRuntime::new(paths.clone(), &execution("/nonexistent/python", 0));

    let err = runtime.install_dependencies("./rules").await.unwrap_err();

    assert!(matches!(err, Error::Provisioning { .. }));
    assert!(paths.venv_dir().is_dir());
}

/// Absolute path of the host's `python3`, if there is one
#[cfg(unix)]
fn host_python() -> Option<PathBuf> {
    let output = std::process::Command::new("python3")
        .args(["-c", "import sys; print(sys.executable)"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

#[cfg(unix)]
#[tokio::test]
async fn test_bootstrap_calls_rule_with_keyword_arguments() {
    let Some(python) = host_python() else {
        eprintln!("python3 not available, skipping");
        return;
    };
    let root = temp_dir();
    let paths = RulebookPaths::new(root.path());
    let interpreter = interpreter_in(&paths.venv_dir());
    std::fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink(&python, &interpreter).unwrap();

    let module_dir = root.path().join("ruleset");
    write_file(
        &module_dir,
        "checks.py",
        r#"import json


def record(*, project_dir=None, level=0, out=None):
    with open(out, "w") as f:
        json.dump([project_dir, level], f)


def failing(**kwargs):
    raise SystemExit(2)
"#,
    );
    let capture = root.path().join("seen.json");
    let runtime = VirtualEnvRuntime::new(paths, &execution("python3", 30));

    let call = RuleInvocation {
        rule_id: "checks.record".to_string(),
        module_dir: module_dir.clone(),
        module: "checks".to_string(),
        function: "record".to_string(),
        kwargs: json!({"project_dir": "/w'\"x", "level": 5, "out": capture})
            .as_object()
            .cloned()
            .unwrap(),
    };
    runtime.invoke(&call).await.unwrap();

    let seen: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&capture).unwrap()).unwrap();
    assert_eq!(seen, json!(["/w'\"x", 5]));

    let failing = RuleInvocation {
        rule_id: "checks.failing".to_string(),
        function: "failing".to_string(),
        ..call
    };
    let err = runtime.invoke(&failing).await.unwrap_err();
    match err {
        Error::Execution { rule_id, .. } => assert_eq!(rule_id, "checks.failing"),
        other => panic!("Expected Execution, got {other:?}"),
    }
}
