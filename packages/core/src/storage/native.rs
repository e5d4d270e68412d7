// localStorage / sessionStorage

use tracing::{debug, error, info, warn};

use crate::error::{PanelError, Result};
use crate::storage::backend::StorageBackend;
use crate::storage::models::{BackendKind, StorageRecord};

/// Platform key/value store with the Web Storage surface
pub trait KeyValueStore {
    fn is_available(&self) -> bool;

    fn len(&self) -> Result<usize>;

    fn key(&self, index: usize) -> Result<Option<String>>;

    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

pub struct NativeStoreBackend<S: KeyValueStore> {
    kind: BackendKind,
    store: S,
}

impl<S: KeyValueStore> NativeStoreBackend<S> {
    pub fn local(store: S) -> Self {
        Self {
            kind: BackendKind::LocalStorage,
            store,
        }
    }

    pub fn session(store: S) -> Self {
        Self {
            kind: BackendKind::SessionStorage,
            store,
        }
    }

    fn failed(&self, call: &str, error: PanelError) -> PanelError {
        let operation = format!("{}.{}()", self.kind.prompt_label(), call);
        error!(operation = %operation, error = %error, "Storage write failed");
        PanelError::write_failed(operation, error.into_reason())
    }

    fn read_all(&self) -> Result<Vec<StorageRecord>> {
        let len = self.store.len()?;
        let mut records = Vec::with_capacity(len);
        for index in 0..len {
            let Some(name) = self.store.key(index)? else {
                continue;
            };
            let value = self.store.get_item(&name)?.unwrap_or_default();
            records.push(StorageRecord { name, value });
        }
        Ok(records)
    }
}

impl<S: KeyValueStore> StorageBackend for NativeStoreBackend<S> {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.store.is_available()
    }

    fn list(&self) -> Vec<StorageRecord> {
        if !self.store.is_available() {
            debug!(kind = %self.kind, "Storage unavailable");
            return Vec::new();
        }

        self.read_all().unwrap_or_else(|e| {
            warn!(kind = %self.kind, error = %e, "Failed to enumerate storage");
            Vec::new()
        })
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        if !self.store.is_available() {
            return Ok(());
        }
        self.store
            .set_item(name, value)
            .map_err(|e| self.failed("setItem", e))
    }

    fn delete(&self, name: &str) -> Result<()> {
        if !self.store.is_available() {
            return Ok(());
        }
        self.store
            .remove_item(name)
            .map_err(|e| self.failed("removeItem", e))
    }

    fn clear(&self) -> Result<()> {
        if !self.store.is_available() {
            return Ok(());
        }
        info!(kind = %self.kind, "Clearing storage");
        self.store.clear().map_err(|e| self.failed("clear", e))
    }
}
