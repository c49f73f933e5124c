use std::process::Command;

use tempfile::tempdir;

fn snapshot_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_release_snapshot"));
    command
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("RELEASE_SNAPSHOT_LOG_DIR")
        .env("RELEASE_SNAPSHOT_LOG", "info");
    command
}

#[test]
fn missing_credentials_exit_with_failure_status() {
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("data");

    let output = snapshot_command()
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run release_snapshot");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CLIENT_ID"), "stderr was: {stderr}");
    assert!(!out.exists());
}

#[test]
fn unknown_timezone_exits_before_any_request() {
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("data");

    let output = snapshot_command()
        .env("CLIENT_ID", "client-123")
        .env("CLIENT_SECRET", "secret-456")
        .env("RELEASE_TOKEN_URL", "http://127.0.0.1:9/unreachable")
        .arg("--out")
        .arg(&out)
        .arg("--timezone")
        .arg("Mars/Olympus_Mons")
        .output()
        .expect("run release_snapshot");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid time zone"), "stderr was: {stderr}");
    assert!(!out.exists());
}
