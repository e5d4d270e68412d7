// Контроллер панели хранилищ
//
// Every mutation is followed by a full list -> render cycle of the current
// backend. Nothing is patched in place.

use std::str::FromStr;
use tracing::{debug, error, info};

use crate::error::{PanelError, Result};
use crate::panel::dialogs::Dialogs;
use crate::panel::render::ListRenderer;
use crate::panel::surface::ListSurface;
use crate::storage::backend::BackendSet;
use crate::storage::models::BackendKind;

/// Действие над строкой списка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

impl RowAction {
    /// Resolve from the class list of a row button (`change` / `delete`)
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut action = None;
        for class in classes {
            match class {
                "delete" => return Some(RowAction::Delete),
                "change" => action = Some(RowAction::Edit),
                _ => {}
            }
        }
        action
    }
}

impl FromStr for RowAction {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "change" | "edit" => Ok(RowAction::Edit),
            "delete" => Ok(RowAction::Delete),
            other => Err(PanelError::InvalidInput(format!("unknown row action: {}", other))),
        }
    }
}

pub struct StoragePanelController {
    backends: BackendSet,
    renderer: ListRenderer,
    dialogs: Box<dyn Dialogs>,
    surface: Box<dyn ListSurface>,
    current: Option<BackendKind>,
}

impl StoragePanelController {
    pub fn new(
        backends: BackendSet,
        renderer: ListRenderer,
        dialogs: Box<dyn Dialogs>,
        surface: Box<dyn ListSurface>,
    ) -> Self {
        Self {
            backends,
            renderer,
            dialogs,
            surface,
            current: None,
        }
    }

    /// `None` until a backend has been selected
    pub fn current_kind(&self) -> Option<BackendKind> {
        self.current
    }

    /// Switch tabs. Re-selecting the active backend does nothing and returns `false`.
    pub fn select_backend(&mut self, kind: BackendKind) -> Result<bool> {
        if self.current == Some(kind) {
            return Ok(false);
        }

        debug!(from = ?self.current, to = %kind, "Switching storage tab");
        self.current = Some(kind);
        self.refresh()?;
        Ok(true)
    }

    /// List the current backend and replace the rendered list.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(kind) = self.current else {
            return Ok(());
        };

        let records = self.backends.backend(kind).list();
        debug!(kind = %kind, count = records.len(), "Rendering storage list");

        let markup = self.renderer.render_records(kind, records)?;
        self.surface.replace(&markup);
        Ok(())
    }

    /// Remove every entry of the current backend after confirmation.
    ///
    /// Returns `false` when there is no selection or the user declined.
    pub fn clear_all(&mut self) -> Result<bool> {
        let Some(kind) = self.current else {
            return Ok(false);
        };

        let message = format!("Remove all {}?", kind.label());
        if self.dialogs.confirm(&message) == Some(false) {
            debug!(kind = %kind, "Clear declined");
            return Ok(false);
        }

        info!(kind = %kind, "Clearing all entries");
        if let Err(e) = self.backends.backend(kind).clear() {
            self.report(e);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Apply a row button. Edit asks for the new value; a dismissed or empty
    /// answer leaves storage untouched.
    pub fn handle_row_action(&mut self, action: RowAction, name: &str, value: &str) -> Result<()> {
        let Some(kind) = self.current else {
            return Ok(());
        };

        let backend = self.backends.backend(kind);
        let outcome = match action {
            RowAction::Edit => {
                let message = format!("{}: {}", kind.prompt_label(), name);
                match self.dialogs.prompt(&message, value) {
                    Some(answer) if !answer.is_empty() => backend.set(name, &answer),
                    _ => {
                        debug!(kind = %kind, entry = name, "Edit cancelled");
                        Ok(())
                    }
                }
            }
            RowAction::Delete => backend.delete(name),
        };

        if let Err(e) = outcome {
            self.report(e);
        }
        self.refresh()
    }

    fn report(&self, e: PanelError) {
        error!(error = %e, "Storage operation failed");
        self.dialogs.alert(&e.to_string());
    }
}
