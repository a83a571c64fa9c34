use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=PAPERPAD_GIT_HASH={hash}");

    if let Some(git_dir) = locate_git_dir() {
        for tracked in ["HEAD", "refs", "packed-refs"] {
            rerun_if_exists(&git_dir.join(tracked));
        }
    }
}

fn locate_git_dir() -> Option<PathBuf> {
    if let Some(from_env) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(from_env));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    // Worktrees and submodules store a `gitdir:` pointer file instead of a directory.
    let contents = fs::read_to_string(&dot_git).ok()?;
    let pointer = contents.strip_prefix("gitdir:")?.trim();
    let resolved = PathBuf::from(pointer);
    if resolved.is_relative() {
        Some(dot_git.parent().unwrap_or(Path::new(".")).join(resolved))
    } else {
        Some(resolved)
    }
}

fn rerun_if_exists(path: &Path) {
    if path.exists()
        && let Some(display) = path.to_str()
    {
        println!("cargo:rerun-if-changed={display}");
    }
}
