//! In-memory file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Entries {
    files: BTreeMap<String, Vec<u8>>,
    /// Directories created explicitly (directories holding files are implied)
    dirs: BTreeSet<String>,
}

/// An in-memory file system implementation.
///
/// Files are stored in a `BTreeMap` keyed by normalized path. A path is a
/// directory when it was created with [`MemoryFileSystem::create_dir`] or when
/// any file lives beneath it.
///
/// # Example
/// ```
/// use strata_vfs::{MemoryFileSystem, VirtualFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.write_file(Path::new("/test.txt"), b"hello").unwrap();
/// let content = fs.read_file(Path::new("/test.txt")).unwrap();
/// assert_eq!(content, b"hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: Arc<RwLock<Entries>>,
}

/// Normalize a path string for internal storage.
///
/// Uses forward slashes, drops `./` prefixes and trailing slashes.
fn normalize_path(path: &Path) -> String {
    let mut text = path.to_string_lossy().replace('\\', "/");
    while let Some(rest) = text.strip_prefix("./") {
        text = rest.to_string();
    }
    while text.len() > 1 && text.ends_with('/') {
        text.pop();
    }
    if text.is_empty() {
        text.push('.');
    }
    text
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new memory file system pre-populated with files.
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: AsRef<str>,
    {
        let fs = Self::new();
        if let Ok(mut entries) = fs.entries.write() {
            for (path, content) in files {
                entries
                    .files
                    .insert(normalize_path(Path::new(path.as_ref())), content);
            }
        }
        fs
    }

    /// Create an (empty) directory
    pub fn create_dir(&self, path: &Path) -> VfsResult<()> {
        let mut entries = self.entries.write().map_err(|_| VfsError::Io {
            message: String::from("lock poisoned"),
        })?;
        entries.dirs.insert(normalize_path(path));
        Ok(())
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        if self.is_dir(path) {
            return Err(VfsError::IsADirectory {
                path: normalize_path(path),
            });
        }

        let normalized = normalize_path(path);
        let entries = self.entries.read().map_err(|_| VfsError::Io {
            message: String::from("lock poisoned"),
        })?;

        entries
            .files
            .get(&normalized)
            .cloned()
            .ok_or(VfsError::NotFound { path: normalized })
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let normalized = normalize_path(path);
        let mut entries = self.entries.write().map_err(|_| VfsError::Io {
            message: String::from("lock poisoned"),
        })?;
        entries.files.insert(normalized, content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        match self.entries.read() {
            Ok(entries) => entries.files.contains_key(&normalized),
            Err(_) => false,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        if entries.dirs.contains(&normalized) {
            return true;
        }

        let prefix = if normalized == "/" {
            normalized.clone()
        } else {
            format!("{normalized}/")
        };
        let under = |key: &String| key.starts_with(&prefix);
        entries.files.keys().any(under) || entries.dirs.iter().any(under)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_fs_is_empty() {
        let fs = MemoryFileSystem::new();
        assert!(!fs.exists(Path::new("/anything.txt")));
        assert!(!fs.is_dir(Path::new("/")));
    }

    #[test]
    fn test_write_and_read() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/test.txt");

        fs.write_file(path, b"hello world").unwrap();
        assert_eq!(fs.read_file(path).unwrap(), b"hello world");
    }

    #[test]
    fn test_directories_are_implied_by_files() {
        let fs = MemoryFileSystem::with_files([("/work/proj/Strata.json", b"{}".to_vec())]);

        assert!(fs.is_dir(Path::new("/work")));
        assert!(fs.is_dir(Path::new("/work/proj")));
        assert!(fs.is_dir(Path::new("/work/proj/")));
        assert!(fs.is_dir(Path::new("/")));
        assert!(!fs.is_dir(Path::new("/work/proj/Strata.json")));
        assert!(!fs.is_dir(Path::new("/work/pro")));
    }

    #[test]
    fn test_relative_paths_normalize() {
        let fs = MemoryFileSystem::with_files([("proj/Strata.json", b"{}".to_vec())]);

        assert!(fs.is_file(Path::new("./proj/Strata.json")));
        assert!(fs.is_dir(Path::new("proj/")));
        assert!(fs.is_dir(Path::new("./proj")));
    }

    #[test]
    fn test_create_dir() {
        let fs = MemoryFileSystem::new();
        fs.create_dir(Path::new("/empty")).unwrap();

        assert!(fs.is_dir(Path::new("/empty")));
        assert!(fs.exists(Path::new("/empty")));
        assert!(!fs.is_file(Path::new("/empty")));
    }

    #[test]
    fn test_read_dir_is_error() {
        let fs = MemoryFileSystem::with_files([("/proj/a.txt", b"a".to_vec())]);
        assert!(matches!(
            fs.read_file(Path::new("/proj")),
            Err(VfsError::IsADirectory { .. })
        ));
    }

    #[test]
    fn test_read_nonexistent() {
        let fs = MemoryFileSystem::new();
        let result = fs.read_file(Path::new("/nonexistent.txt"));
        assert!(matches!(result, Err(VfsError::NotFound { .. })));
    }

    #[test]
    fn test_read_to_string_invalid_utf8() {
        let fs = MemoryFileSystem::with_files([("/bad.json", vec![0xff, 0xfe])]);
        assert!(matches!(
            fs.read_to_string(Path::new("/bad.json")),
            Err(VfsError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_clone_shares_data() {
        let fs1 = MemoryFileSystem::new();
        let path = Path::new("/shared.txt");
        fs1.write_file(path, b"shared").unwrap();

        let fs2 = fs1.clone();
        fs2.write_file(path, b"modified").unwrap();
        assert_eq!(fs1.read_file(path).unwrap(), b"modified");
    }

    #[test]
    fn test_concurrent_reads() {
        let fs = MemoryFileSystem::with_files([("/test.txt", b"concurrent".to_vec())]);
        let mut handles = vec![];

        for _ in 0..4 {
            let fs_clone = fs.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    let content = fs_clone.read_file(Path::new("/test.txt")).unwrap();
                    assert_eq!(content, b"concurrent");
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
