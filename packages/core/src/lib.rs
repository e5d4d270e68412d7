// Storage Panel Core
// Inspection and editing of cookies, localStorage and sessionStorage

#![warn(clippy::all)]

// Модули
pub mod config;
pub mod error;
pub mod panel;
pub mod storage;
pub mod utils;

// Re-exports для удобства
pub use error::{PanelError, Result};
pub use panel::{StoragePanelController, StoragePlugin};
pub use storage::{BackendKind, StorageBackend, StorageRecord};

// WASM-specific bindings
#[cfg(target_arch = "wasm32")]
pub mod wasm;
