use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::{ObjectStore, StorageError};

/// Keeps objects in a map. `fail_uploads` makes every `put` error out.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Bytes>>,
    fail_uploads: AtomicBool,
}

impl MemoryObjectStore {
    pub fn set_failing(&self, failing: bool) {
        self.fail_uploads.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Upload {
                key: key.to_string(),
                message: "storage offline".to_string(),
            });
        }
        if body.is_empty() {
            return Err(StorageError::EmptyObject(key.to_string()));
        }
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(format!("memory://objects/{key}"))
    }
}
