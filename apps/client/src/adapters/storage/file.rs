use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::session::CredentialStore;

type Entries = BTreeMap<String, String>;

/// Credential store backed by a single JSON object on disk.
///
/// A missing file reads as empty. Every write replaces the whole file through
/// a temporary sibling and a rename, with mode 0600 on unix. A file that is
/// not a JSON object of strings is reported as a storage error.
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<Entries> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents).map_err(|e| storage_error("parse", &self.path, e))
    }

    async fn save(&self, entries: &Entries) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create directory for", &self.path, e))?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| storage_error("serialize", &self.path, e))?;

        let tmp_path = self.tmp_path();
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&tmp_path)
            .await
            .map_err(|e| storage_error("open", &tmp_path, e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| storage_error("write", &tmp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("sync", &tmp_path, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_error("replace", &self.path, e))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Credentials written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "credentials".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, keys: &[&str]) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.save(&entries).await
    }
}

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Storage(format!("Failed to {action} {}: {e}", path.display()))
}
