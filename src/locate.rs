use std::path::{Path, PathBuf};
use log::debug;
use walkdir::WalkDir;

pub const DEFAULT_ENGINE_BINARY: &str = "HighLoEdit.exe";

/// Filesystem roots to search: every mounted drive on Windows, `/` elsewhere.
#[cfg(windows)]
pub fn search_roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|drive| drive.exists())
        .collect()
}

#[cfg(not(windows))]
pub fn search_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}

/// Every file or directory named `file_name` below `roots`.
pub fn find_paths(file_name: &str, roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut result = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_name() == file_name {
                result.push(absolute(entry.path()));
            }
        }
    }
    result
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(dir) => dir.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// At least one path must point at the engine binary before anything gets executed.
pub fn paths_are_valid<P: AsRef<Path>>(paths: &[P], engine_binary: &str) -> bool {
    paths.iter().any(|path| path.as_ref().to_string_lossy().contains(engine_binary))
}
