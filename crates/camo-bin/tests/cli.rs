//! Process-level checks that never reach raw mode: everything here fails or
//! exits before the terminal is entered.

use std::process::Command;

fn camo(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_camo"));
    cmd.current_dir(dir);
    cmd
}

#[test]
fn version_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = camo(dir.path()).arg("--version").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("camo"));
}

#[test]
fn help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = camo(dir.path()).arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));
}

#[test]
fn missing_argument_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = camo(dir.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error"));
}

#[test]
fn unknown_flag_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = camo(dir.path()).args(["--bogus", "x.txt"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn uncreatable_file_reports_error_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no_such_dir").join("file.txt");
    let out = camo(dir.path()).arg(&target).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: "), "stderr was {stderr:?}");
    assert!(stderr.contains("file.txt"));
    assert!(!target.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn unwritable_working_directory_still_exits_one() {
    // No camo.log can be created here; logging is skipped, not fatal.
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no_such_dir").join("file.txt");
    let out = camo(std::path::Path::new("/proc"))
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: "), "stderr was {stderr:?}");
}
