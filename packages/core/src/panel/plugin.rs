// Жизненный цикл плагина
//
// The host calls in only through these hooks. Buttons carry an action
// value instead of a callback; the host routes clicks back here.

use serde::Serialize;
use std::str::FromStr;

use crate::error::{PanelError, Result};
use crate::panel::controller::{RowAction, StoragePanelController};
use crate::panel::render::TABBOX_TEMPLATE;
use crate::storage::models::BackendKind;

/// Class marking the active tab
pub const ACTIVE_CLASS: &str = "vc-actived";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBarButton {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: BackendKind,
    pub class_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    Refresh,
    Clear,
}

impl ToolAction {
    pub fn name(&self) -> &'static str {
        match self {
            ToolAction::Refresh => "Refresh",
            ToolAction::Clear => "Clear",
        }
    }
}

impl FromStr for ToolAction {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        [ToolAction::Refresh, ToolAction::Clear]
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PanelError::InvalidInput(format!("unknown tool: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolButton {
    pub name: &'static str,
    #[serde(skip)]
    pub action: ToolAction,
    pub global: bool,
}

pub struct StoragePlugin {
    controller: StoragePanelController,
}

impl StoragePlugin {
    pub fn new(controller: StoragePanelController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &StoragePanelController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut StoragePanelController {
        &mut self.controller
    }

    pub fn on_render_tab(&self) -> &'static str {
        TABBOX_TEMPLATE
    }

    /// One tab per backend; the active one (Cookies before first show) is marked.
    pub fn on_add_top_bar(&self) -> Vec<TopBarButton> {
        let active = self.controller.current_kind().unwrap_or(BackendKind::Cookie);
        BackendKind::ALL
            .into_iter()
            .map(|kind| TopBarButton {
                name: kind.label(),
                kind,
                class_name: if kind == active { ACTIVE_CLASS } else { "" },
            })
            .collect()
    }

    /// Returns `false` when the clicked tab is already active.
    pub fn on_top_bar_click(&mut self, kind: BackendKind) -> Result<bool> {
        self.controller.select_backend(kind)
    }

    pub fn on_add_tool(&self) -> Vec<ToolButton> {
        [ToolAction::Refresh, ToolAction::Clear]
            .into_iter()
            .map(|action| ToolButton {
                name: action.name(),
                action,
                global: false,
            })
            .collect()
    }

    pub fn on_tool_click(&mut self, action: ToolAction) -> Result<()> {
        match action {
            ToolAction::Refresh => self.controller.refresh(),
            ToolAction::Clear => self.controller.clear_all().map(|_| ()),
        }
    }

    pub fn on_ready(&mut self) {}

    /// First show selects Cookies and renders. Returns `true` exactly once,
    /// when the host should attach the row delegate.
    pub fn on_show(&mut self) -> Result<bool> {
        if self.controller.current_kind().is_some() {
            return Ok(false);
        }
        self.controller.select_backend(BackendKind::Cookie)?;
        Ok(true)
    }

    pub fn on_row_action(&mut self, action: RowAction, name: &str, value: &str) -> Result<()> {
        self.controller.handle_row_action(action, name, value)
    }
}
