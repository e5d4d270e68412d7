// Панель: controller, rendering adapter and host lifecycle

pub mod controller;
pub mod dialogs;
pub mod plugin;
pub mod render;
pub mod surface;

pub use controller::{RowAction, StoragePanelController};
pub use dialogs::Dialogs;
pub use plugin::{StoragePlugin, ToolAction, ToolButton, TopBarButton};
pub use render::{BuiltinTemplateEngine, ListRenderer, ListView, TemplateEngine};
pub use surface::{ListSurface, MarkupBuffer};
