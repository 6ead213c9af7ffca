//! File store holding uploads referenced by `file` attributes

pub mod filename;
pub mod local;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::StorageResult;

pub use local::LocalFileStore;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Directory stored filenames are relative to
    fn root(&self) -> &Path;

    fn resolve(&self, stored: &str) -> PathBuf {
        self.root().join(stored)
    }

    /// Copy `from` to `to`, creating missing parent directories of `to`
    async fn copy(&self, from: &Path, to: &Path) -> StorageResult<()>;

    async fn remove(&self, path: &Path) -> StorageResult<()>;
}
