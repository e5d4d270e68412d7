// WASM: web-sys adapters and the exported panel

pub mod bindings;
pub mod console;
pub mod web;

pub use bindings::StoragePanel;
