// In-memory key/value backend. Used by tests as the injectable fake the
// store contract calls for, and as a non-durable fallback on platforms
// without writable storage.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use parking_lot::Mutex;

use crate::components::DispatchResult;
use crate::components::capability::KeyValueBackend;

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current contents, for direct assertions in tests.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().clone()
    }
}

impl KeyValueBackend for MemoryStore {
    fn persist(
        &self,
        key: String,
        value: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        self.entries.lock().insert(key, value);
        Box::pin(async { Ok(()) })
    }

    fn read(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<Option<String>>> + Send + '_>> {
        let value = self.entries.lock().get(&key).cloned();
        Box::pin(async move { Ok(value) })
    }

    fn remove(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        self.entries.lock().remove(&key);
        Box::pin(async { Ok(()) })
    }
}
