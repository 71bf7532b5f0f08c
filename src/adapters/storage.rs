use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// File system storage rooted at `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn prepare(&self) -> Result<()> {
        if !self.base_path.exists() {
            tracing::debug!("Creating output directory {}", self.base_path.display());
        }
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prepare_creates_nested_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("content").join("services");
        let storage = LocalStorage::new(&root);

        storage.prepare().await.unwrap();
        assert!(root.is_dir());

        storage.write_file("a.mdx", b"---\n---\n").await.unwrap();
        assert_eq!(storage.read_file("a.mdx").await.unwrap(), b"---\n---\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp.path());
        assert!(storage.read_file("missing.html").await.is_err());
    }
}
