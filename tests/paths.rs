use std::path::{Path, PathBuf};

use seedrun::paths::{DEFAULT_SCRIPT, resolve_script_path, runner_dir};

#[cfg(unix)]
#[test]
fn default_script_is_one_level_above_runner() {
    let resolved = resolve_script_path(Path::new("/opt/app/electron"), DEFAULT_SCRIPT);
    assert_eq!(resolved, PathBuf::from("/opt/app/database/seed.js"));
}

#[cfg(unix)]
#[test]
fn absolute_script_ignores_runner_dir() {
    let resolved = resolve_script_path(Path::new("/opt/app"), "/srv/./seeds/../seed.js");
    assert_eq!(resolved, PathBuf::from("/srv/seed.js"));
}

#[cfg(unix)]
#[test]
fn parent_of_root_stays_at_root() {
    let resolved = resolve_script_path(Path::new("/"), "../../seed.js");
    assert_eq!(resolved, PathBuf::from("/seed.js"));
}

#[test]
fn explicit_runner_dir_is_made_absolute() {
    let dir = runner_dir(Some("relative/dir")).unwrap();
    assert!(dir.is_absolute());
    assert!(dir.ends_with("relative/dir"));
}

#[test]
fn default_runner_dir_is_the_executable_directory() {
    let dir = runner_dir(None).unwrap();
    let exe = std::env::current_exe().unwrap();
    assert_eq!(Some(dir.as_path()), exe.parent());
}
