// src/paths.rs

//! Locating the seeding script.
//!
//! The script lives at a fixed place relative to the runner itself: one
//! directory above it, under `database/seed.js`.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Script location relative to the runner directory.
pub const DEFAULT_SCRIPT: &str = "../database/seed.js";

/// Directory the runner treats as its own location.
///
/// An explicit `configured` directory wins; otherwise this is the directory
/// holding the current executable.
pub fn runner_dir(configured: Option<&str>) -> io::Result<PathBuf> {
    let dir = match configured {
        Some(dir) => PathBuf::from(dir),
        None => {
            let exe = std::env::current_exe()?;
            exe.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| io::Error::other("current executable has no parent directory"))?
        }
    };
    std::path::absolute(dir)
}

/// Resolve `script` against `runner_dir` into an absolute, lexically
/// normalised path. Absolute scripts are only normalised.
///
/// The file is not required to exist; a missing script surfaces later as
/// an error from the interpreter.
pub fn resolve_script_path(runner_dir: &Path, script: &str) -> PathBuf {
    let script = Path::new(script);
    let joined = if script.is_absolute() {
        script.to_path_buf()
    } else {
        runner_dir.join(script)
    };
    normalize(&joined)
}

/// Remove `.` and fold `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // Never climb past the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
