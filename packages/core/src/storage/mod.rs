// Модуль хранилищ: cookies, localStorage, sessionStorage

pub mod backend;
pub mod cookie;
pub mod memory;
pub mod models;
pub mod native;

pub use backend::{BackendSet, StorageBackend};
pub use cookie::{CookieBackend, CookieJar, CookieSettings};
pub use memory::{MemoryCookieJar, MemoryStore};
pub use models::{BackendKind, Expiry, StorageRecord};
pub use native::{KeyValueStore, NativeStoreBackend};
