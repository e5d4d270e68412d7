// Общий контракт хранилищ

use crate::error::Result;
use crate::storage::models::{BackendKind, StorageRecord};

/// Uniform capability set over one platform store.
///
/// `list` never fails: an unavailable store or a platform error yields an
/// empty list. Mutations on an unavailable store are no-ops; platform write
/// failures come back as [`crate::error::PanelError::WriteFailed`].
pub trait StorageBackend {
    fn kind(&self) -> BackendKind;

    fn is_available(&self) -> bool;

    fn list(&self) -> Vec<StorageRecord>;

    fn set(&self, name: &str, value: &str) -> Result<()>;

    fn delete(&self, name: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// One backend per [`BackendKind`]
pub struct BackendSet {
    cookie: Box<dyn StorageBackend>,
    local: Box<dyn StorageBackend>,
    session: Box<dyn StorageBackend>,
}

impl BackendSet {
    pub fn new(
        cookie: Box<dyn StorageBackend>,
        local: Box<dyn StorageBackend>,
        session: Box<dyn StorageBackend>,
    ) -> Self {
        debug_assert_eq!(cookie.kind(), BackendKind::Cookie);
        debug_assert_eq!(local.kind(), BackendKind::LocalStorage);
        debug_assert_eq!(session.kind(), BackendKind::SessionStorage);
        Self {
            cookie,
            local,
            session,
        }
    }

    pub fn backend(&self, kind: BackendKind) -> &dyn StorageBackend {
        match kind {
            BackendKind::Cookie => self.cookie.as_ref(),
            BackendKind::LocalStorage => self.local.as_ref(),
            BackendKind::SessionStorage => self.session.as_ref(),
        }
    }
}
