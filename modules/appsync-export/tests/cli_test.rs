//! Invocation tests against the built binary.
//!
//! Every run here is rejected during argument validation, so no AWS client is
//! ever built and no output directory may appear.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const REQUIRED: [(&str, &str, &str); 4] = [
    ("aws-key", "--aws-key", "AKIAEXAMPLE"),
    ("aws-secret", "--aws-secret", "secret"),
    ("api-id", "--api-id", "abc123"),
    ("aws-region", "--aws-region", "eu-west-1"),
];

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appsync-export"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn args_without(missing: &str) -> Vec<&'static str> {
    REQUIRED
        .iter()
        .filter(|(name, _, _)| *name != missing)
        .flat_map(|(_, flag, value)| [*flag, *value])
        .collect()
}

// =========================================================================
// Missing options
// =========================================================================

#[test]
fn each_missing_required_option_exits_one_without_output() {
    for (name, _, _) in REQUIRED {
        let cwd = TempDir::new().unwrap();
        let output = run(cwd.path(), &args_without(name));

        assert_eq!(output.status.code(), Some(1), "missing {name}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains(&format!(
                "ERROR! Missing required option {name}, run -h for help"
            )),
            "missing {name}: {stderr}"
        );
        assert!(!cwd.path().join("mappingTemplates").exists());
    }
}

#[test]
fn no_arguments_reports_first_required_option() {
    let cwd = TempDir::new().unwrap();
    let output = run(cwd.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required option aws-key"), "{stderr}");
}

#[test]
fn option_given_without_value_exits_one() {
    let cwd = TempDir::new().unwrap();
    let output = run(
        cwd.path(),
        &["-k", "k", "-s", "s", "-r", "eu-west-1", "--api-id"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
    assert!(!cwd.path().join("mappingTemplates").exists());
}

// =========================================================================
// Help and version
// =========================================================================

#[test]
fn help_exits_zero_and_states_exit_status() {
    let cwd = TempDir::new().unwrap();
    let output = run(cwd.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--api-id"), "{stdout}");
    assert!(stdout.contains("Exit status:"), "{stdout}");
}

#[test]
fn version_exits_zero() {
    let cwd = TempDir::new().unwrap();
    let output = run(cwd.path(), &["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("0.0.1 Beta"));
}
