use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::FileStore;
use crate::errors::{StorageError, StorageResult};

/// File store backed by a local directory
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn copy(&self, from: &Path, to: &Path) -> StorageResult<()> {
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let bytes = tokio::fs::copy(from, to)
            .await
            .map_err(|source| StorageError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })?;

        debug!("Copied {} bytes from {} to {}", bytes, from.display(), to.display());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> StorageResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|source| StorageError::Remove {
                path: path.to_path_buf(),
                source,
            })
    }
}
