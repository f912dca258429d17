// File-backed key/value storage: one file per key under a base directory.
// Readable before any other subsystem initializes, so a parked intent
// survives cold start.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::fs;
use tokio::sync::Mutex;

use crate::components::capability::KeyValueBackend;
use crate::components::{DispatchError, DispatchResult};

pub struct FileStore {
    base_dir: PathBuf,
    // Serializes writers so a save landing mid-clear cannot tear a slot.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; anything else is reduced to a safe
        // file name.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(name)
    }

    fn failure(operation: &'static str, key: &str, error: std::io::Error) -> DispatchError {
        DispatchError::StorageFailure {
            operation,
            key: key.to_string(),
            message: error.to_string(),
        }
    }
}

impl KeyValueBackend for FileStore {
    fn persist(
        &self,
        key: String,
        value: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            fs::create_dir_all(&self.base_dir)
                .await
                .map_err(|e| Self::failure("persist", &key, e))?;
            let path = self.path_for(&key);
            // Write-then-rename keeps the slot intact across a crash
            // mid-write.
            let mut staging = path.clone().into_os_string();
            staging.push(".tmp");
            fs::write(&staging, value.as_bytes())
                .await
                .map_err(|e| Self::failure("persist", &key, e))?;
            fs::rename(&staging, &path)
                .await
                .map_err(|e| Self::failure("persist", &key, e))?;
            Ok(())
        })
    }

    fn read(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<Option<String>>> + Send + '_>> {
        Box::pin(async move {
            match fs::read_to_string(self.path_for(&key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(Self::failure("read", &key, e)),
            }
        })
    }

    fn remove(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            match fs::remove_file(self.path_for(&key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(Self::failure("remove", &key, e)),
            }
        })
    }
}
