use std::path::{Path, PathBuf};

use crate::Result;

/// Writes submitted images under a fixed directory, named as received.
#[derive(Clone, Debug)]
pub struct UploadService {
    root: PathBuf,
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload root if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Stores `bytes` as `<root>/<filename>` and returns that path.
    ///
    /// An existing file with the same name is overwritten. Any directory part
    /// of `filename` is dropped. Returns `None` when there is no usable name,
    /// which is what a form posted without a chosen file looks like.
    pub async fn save(&self, bytes: &[u8], filename: &str) -> Result<Option<String>> {
        let Some(name) = Path::new(filename).file_name() else {
            return Ok(None);
        };

        self.ensure_root().await?;
        let save_path = self.root.join(name);
        tokio::fs::write(&save_path, bytes).await?;

        tracing::info!(path = %save_path.display(), size = bytes.len(), "Upload stored");
        Ok(Some(save_path.to_string_lossy().into_owned()))
    }

    /// Removes a file written by [`save`](Self::save) that ended up unused.
    pub async fn discard(&self, path: &str) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::info!(path, "Upload discarded"),
            Err(err) => tracing::warn!(path, error = %err, "Could not discard upload"),
        }
    }
}
