// Типы ошибок

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("{operation} fail: {reason}")]
    WriteFailed { operation: String, reason: String },

    #[error("{operation} read failed: {reason}")]
    ReadFailed { operation: String, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PanelError {
    pub fn write_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        PanelError::WriteFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Text of the underlying failure without the variant prefix
    pub fn into_reason(self) -> String {
        match self {
            PanelError::Platform(reason) => reason,
            other => other.to_string(),
        }
    }

    pub fn read_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        PanelError::ReadFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;

// Для WASM-биндингов
#[cfg(target_arch = "wasm32")]
impl From<PanelError> for wasm_bindgen::JsValue {
    fn from(error: PanelError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for PanelError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        PanelError::Render(error.to_string())
    }
}
