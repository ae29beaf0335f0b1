use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Filesystem storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|source| EtlError::FileNotFound {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if let Err(e) = fs::write(&full_path, data) {
            // 寫入失敗時移除殘留檔案
            if full_path.is_file() {
                let _ = fs::remove_file(&full_path);
            }
            return Err(EtlError::IoError(e));
        }
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        match fs::remove_file(self.resolve(path)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(EtlError::IoError(e)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("nested/out.csv", b"A\n1\n").unwrap();

        assert!(dir.path().join("nested/out.csv").is_file());
        assert_eq!(storage.read_file("nested/out.csv").unwrap(), b"A\n1\n");
    }

    #[test]
    fn test_missing_file_maps_to_file_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("nope.csv").unwrap_err();
        assert!(matches!(err, EtlError::FileNotFound { .. }));
        assert!(!dir.path().join("nope.csv").exists());
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        std::fs::write(dir.path().join("blocker"), b"not a directory").unwrap();

        let err = storage.write_file("blocker/out.csv", b"A\n1\n").unwrap_err();

        assert!(matches!(err, EtlError::IoError(_)));
        assert!(!dir.path().join("blocker/out.csv").exists());
        assert_eq!(std::fs::read(dir.path().join("blocker")).unwrap(), b"not a directory");
    }

    #[test]
    fn test_write_onto_directory_fails_and_keeps_directory() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        std::fs::create_dir(dir.path().join("out.csv")).unwrap();

        assert!(storage.write_file("out.csv", b"A\n").is_err());
        assert!(dir.path().join("out.csv").is_dir());
    }

    #[test]
    fn test_remove_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.write_file("out.csv", b"A\n").unwrap();

        storage.remove_file("out.csv").unwrap();
        assert!(!dir.path().join("out.csv").exists());
        // 已不存在的檔案不算錯誤
        storage.remove_file("out.csv").unwrap();
    }

    #[test]
    fn test_directory_is_not_readable_as_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(matches!(
            storage.read_file("."),
            Err(EtlError::FileNotFound { .. })
        ));
    }
}
