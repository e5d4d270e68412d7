//! End-to-end tests for the storage panel
//!
//! This test suite covers:
//! - Tab selection and the list -> render cycle
//! - Row edit/delete through the prompt capability
//! - Clear with and without confirmation
//! - Write failures surfacing as a single alert
//! - Host lifecycle hooks

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use storage_panel_core::error::Result;
use storage_panel_core::panel::{
    Dialogs, ListRenderer, ListView, MarkupBuffer, RowAction, StoragePanelController,
    StoragePlugin, ToolAction,
};
use storage_panel_core::storage::{
    BackendKind, BackendSet, CookieBackend, CookieSettings, MemoryCookieJar, MemoryStore,
    NativeStoreBackend, StorageBackend, StorageRecord,
};

#[derive(Default)]
struct DialogState {
    prompt_answers: VecDeque<Option<String>>,
    confirm_answer: Option<bool>,
    prompts: Vec<(String, String)>,
    confirms: Vec<String>,
    alerts: Vec<String>,
}

/// Dialogs answering from a script and recording every call
#[derive(Clone, Default)]
struct ScriptedDialogs {
    state: Rc<RefCell<DialogState>>,
}

impl ScriptedDialogs {
    fn answer_prompt(&self, answer: Option<&str>) {
        self.state
            .borrow_mut()
            .prompt_answers
            .push_back(answer.map(str::to_string));
    }

    fn answer_confirm(&self, answer: Option<bool>) {
        self.state.borrow_mut().confirm_answer = answer;
    }

    fn prompts(&self) -> Vec<(String, String)> {
        self.state.borrow().prompts.clone()
    }

    fn confirms(&self) -> Vec<String> {
        self.state.borrow().confirms.clone()
    }

    fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.prompts.push((message.to_string(), default.to_string()));
        state.prompt_answers.pop_front().flatten()
    }

    fn confirm(&self, message: &str) -> Option<bool> {
        let mut state = self.state.borrow_mut();
        state.confirms.push(message.to_string());
        state.confirm_answer
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}

/// Backend wrapper counting `list()` calls
struct CountingBackend<B: StorageBackend> {
    inner: B,
    lists: Rc<Cell<usize>>,
}

impl<B: StorageBackend> StorageBackend for CountingBackend<B> {
    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn list(&self) -> Vec<StorageRecord> {
        self.lists.set(self.lists.get() + 1);
        self.inner.list()
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.inner.set(name, value)
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.inner.delete(name)
    }

    fn clear(&self) -> Result<()> {
        self.inner.clear()
    }
}

struct Fixture {
    jar: MemoryCookieJar,
    local: MemoryStore,
    session: MemoryStore,
    dialogs: ScriptedDialogs,
    surface: MarkupBuffer,
    lists: Rc<Cell<usize>>,
}

impl Fixture {
    fn new(cookies: &str, local: &[(&str, &str)], session: &[(&str, &str)]) -> Self {
        Self {
            jar: MemoryCookieJar::from_cookie_string(cookies),
            local: MemoryStore::from_pairs(local.iter().copied()),
            session: MemoryStore::from_pairs(session.iter().copied()),
            dialogs: ScriptedDialogs::default(),
            surface: MarkupBuffer::new(),
            lists: Rc::new(Cell::new(0)),
        }
    }

    fn controller(&self) -> StoragePanelController {
        let settings = CookieSettings {
            domain: None,
            path: "/".to_string(),
            expiry_days: 1,
        };
        let backends = BackendSet::new(
            Box::new(CountingBackend {
                inner: CookieBackend::with_settings(self.jar.clone(), settings),
                lists: Rc::clone(&self.lists),
            }),
            Box::new(CountingBackend {
                inner: NativeStoreBackend::local(self.local.clone()),
                lists: Rc::clone(&self.lists),
            }),
            Box::new(CountingBackend {
                inner: NativeStoreBackend::session(self.session.clone()),
                lists: Rc::clone(&self.lists),
            }),
        );

        StoragePanelController::new(
            backends,
            ListRenderer::default(),
            Box::new(self.dialogs.clone()),
            Box::new(self.surface.clone()),
        )
    }

    fn plugin(&self) -> StoragePlugin {
        StoragePlugin::new(self.controller())
    }

    fn cookie_records(&self) -> Vec<StorageRecord> {
        let settings = CookieSettings {
            domain: None,
            path: "/".to_string(),
            expiry_days: 1,
        };
        CookieBackend::with_settings(self.jar.clone(), settings).list()
    }
}

fn pairs(store: &MemoryStore) -> Vec<(String, String)> {
    store.snapshot()
}

/// Test that nothing renders before a backend is selected
#[test]
fn test_no_selection_renders_nothing() {
    let fixture = Fixture::new("a=1", &[], &[]);
    let mut controller = fixture.controller();

    assert_eq!(controller.current_kind(), None);
    controller.refresh().unwrap();
    controller
        .handle_row_action(RowAction::Delete, "a", "1")
        .unwrap();
    assert!(!controller.clear_all().unwrap());

    assert_eq!(fixture.surface.renders(), 0);
    assert_eq!(fixture.lists.get(), 0);
    assert_eq!(fixture.cookie_records(), vec![StorageRecord::new("a", "1")]);
}

/// Test that the first show selects cookies and only the first show asks for binding
#[test]
fn test_first_show_selects_cookies() {
    let fixture = Fixture::new("a=1; b=2=3; c", &[], &[]);
    let mut plugin = fixture.plugin();

    assert!(plugin.on_show().unwrap());
    assert_eq!(plugin.controller().current_kind(), Some(BackendKind::Cookie));
    assert_eq!(fixture.surface.renders(), 1);

    let markup = fixture.surface.markup();
    assert!(markup.contains("data-name=\"b\" data-value=\"2=3\""));
    assert!(markup.contains("data-name=\"c\" data-value=\"\""));

    assert!(!plugin.on_show().unwrap());
    assert_eq!(fixture.surface.renders(), 1);
}

/// Test that re-selecting the active backend produces a single list/render cycle
#[test]
fn test_reselecting_backend_is_a_noop() {
    let fixture = Fixture::new("", &[("x", "1")], &[]);
    let mut controller = fixture.controller();

    assert!(controller.select_backend(BackendKind::LocalStorage).unwrap());
    assert!(!controller.select_backend(BackendKind::LocalStorage).unwrap());

    assert_eq!(fixture.lists.get(), 1);
    assert_eq!(fixture.surface.renders(), 1);
}

/// Test that switching tabs never shows another backend's data
#[test]
fn test_switching_tabs_renders_selected_backend() {
    let fixture = Fixture::new("cookie_only=1", &[("local_only", "2")], &[("session_only", "3")]);
    let mut controller = fixture.controller();

    controller.select_backend(BackendKind::SessionStorage).unwrap();
    let markup = fixture.surface.markup();
    assert!(markup.contains("session_only"));
    assert!(!markup.contains("local_only"));
    assert!(!markup.contains("cookie_only"));

    controller.select_backend(BackendKind::LocalStorage).unwrap();
    let markup = fixture.surface.markup();
    assert!(markup.contains("local_only"));
    assert!(!markup.contains("session_only"));
}

/// Test that an empty backend renders an empty container
#[test]
fn test_empty_backend_renders_empty_markup() {
    let fixture = Fixture::new("a=1", &[], &[]);
    let mut controller = fixture.controller();

    controller.select_backend(BackendKind::Cookie).unwrap();
    assert!(!fixture.surface.markup().is_empty());

    controller.select_backend(BackendKind::SessionStorage).unwrap();
    assert_eq!(fixture.surface.markup(), "");
}

/// Test clearing local storage after confirmation
#[test]
fn test_clear_all_confirmed() {
    let fixture = Fixture::new("", &[("x", "1"), ("y", "2")], &[]);
    fixture.dialogs.answer_confirm(Some(true));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::LocalStorage).unwrap();

    assert!(controller.clear_all().unwrap());

    assert!(pairs(&fixture.local).is_empty());
    assert_eq!(fixture.dialogs.confirms(), vec!["Remove all LocalStorage?"]);
    assert_eq!(fixture.surface.markup(), "");
    assert_eq!(fixture.surface.renders(), 2);
}

/// Test that declining the confirmation leaves storage unchanged
#[test]
fn test_clear_all_declined() {
    let fixture = Fixture::new("", &[("x", "1"), ("y", "2")], &[]);
    fixture.dialogs.answer_confirm(Some(false));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::LocalStorage).unwrap();

    assert!(!controller.clear_all().unwrap());

    assert_eq!(
        pairs(&fixture.local),
        vec![
            ("x".to_string(), "1".to_string()),
            ("y".to_string(), "2".to_string())
        ]
    );
    assert_eq!(fixture.surface.renders(), 1);
}

/// Test that a host without a confirmation dialog clears unconditionally
#[test]
fn test_clear_all_without_confirm_capability() {
    let fixture = Fixture::new("a=1; b=2", &[], &[]);
    fixture.dialogs.answer_confirm(None);
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::Cookie).unwrap();

    assert!(controller.clear_all().unwrap());

    assert!(fixture.cookie_records().is_empty());
    assert_eq!(fixture.dialogs.confirms(), vec!["Remove all Cookies?"]);
}

/// Test editing a cookie through the prompt
#[test]
fn test_edit_cookie_with_prompt() {
    let fixture = Fixture::new("tok=old; other=1", &[], &[]);
    fixture.dialogs.answer_prompt(Some("v"));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::Cookie).unwrap();

    controller
        .handle_row_action(RowAction::Edit, "tok", "old")
        .unwrap();

    assert_eq!(
        fixture.dialogs.prompts(),
        vec![("cookie: tok".to_string(), "old".to_string())]
    );
    assert!(fixture
        .cookie_records()
        .contains(&StorageRecord::new("tok", "v")));
    assert!(fixture.surface.markup().contains("data-value=\"v\""));
}

/// Test that values are percent-encoded on write and decoded on read
#[test]
fn test_edit_cookie_encodes_value() {
    let fixture = Fixture::new("", &[], &[]);
    fixture.dialogs.answer_prompt(Some("a b;c"));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::Cookie).unwrap();

    controller
        .handle_row_action(RowAction::Edit, "tok", "")
        .unwrap();

    assert_eq!(fixture.jar.get("tok").as_deref(), Some("a%20b%3Bc"));
    assert_eq!(fixture.cookie_records(), vec![StorageRecord::new("tok", "a b;c")]);
}

/// Test that a dismissed or empty prompt is a no-op
#[test]
fn test_cancelled_prompt_leaves_state() {
    let fixture = Fixture::new("tok=old", &[("k", "v")], &[]);
    fixture.dialogs.answer_prompt(None);
    fixture.dialogs.answer_prompt(Some(""));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::Cookie).unwrap();

    controller
        .handle_row_action(RowAction::Edit, "tok", "old")
        .unwrap();
    assert_eq!(fixture.cookie_records(), vec![StorageRecord::new("tok", "old")]);
    assert_eq!(fixture.jar.last_write(), None);

    controller.select_backend(BackendKind::LocalStorage).unwrap();
    controller
        .handle_row_action(RowAction::Edit, "k", "v")
        .unwrap();
    assert_eq!(fixture.local.get("k").as_deref(), Some("v"));

    assert_eq!(fixture.dialogs.prompts().len(), 2);
    assert!(fixture.dialogs.alerts().is_empty());
}

/// Test that session edits land in session storage, not local storage
#[test]
fn test_session_edit_writes_session_storage() {
    let fixture = Fixture::new("", &[], &[("k", "old")]);
    fixture.dialogs.answer_prompt(Some("new"));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::SessionStorage).unwrap();

    controller
        .handle_row_action(RowAction::Edit, "k", "old")
        .unwrap();

    assert_eq!(fixture.session.get("k").as_deref(), Some("new"));
    assert!(pairs(&fixture.local).is_empty());
    assert_eq!(
        fixture.dialogs.prompts()[0].0,
        "sessionStorage: k".to_string()
    );
}

/// Test that delete removes the record from every backend
#[test]
fn test_delete_on_every_backend() {
    let fixture = Fixture::new("a=1; b=2", &[("a", "1"), ("b", "2")], &[("a", "1"), ("b", "2")]);
    let mut controller = fixture.controller();

    for kind in BackendKind::ALL {
        controller.select_backend(kind).unwrap();
        controller.handle_row_action(RowAction::Delete, "a", "1").unwrap();
        assert!(!fixture.surface.markup().contains("data-name=\"a\""));
        assert!(fixture.surface.markup().contains("data-name=\"b\""));
    }

    assert!(fixture.cookie_records().iter().all(|r| r.name != "a"));
    assert_eq!(fixture.local.get("a"), None);
    assert_eq!(fixture.session.get("a"), None);
    assert!(fixture.dialogs.prompts().is_empty());
}

/// Test that a failing write alerts once and leaves the panel usable
#[test]
fn test_write_failure_alerts_once() {
    let fixture = Fixture::new("", &[("x", "1")], &[]);
    fixture.local.fail_writes(true);
    fixture.dialogs.answer_prompt(Some("2"));
    fixture.dialogs.answer_confirm(Some(true));
    let mut controller = fixture.controller();
    controller.select_backend(BackendKind::LocalStorage).unwrap();

    controller
        .handle_row_action(RowAction::Edit, "x", "1")
        .unwrap();

    let alerts = fixture.dialogs.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("localStorage.setItem() fail"));
    assert_eq!(fixture.local.get("x").as_deref(), Some("1"));
    assert!(fixture.surface.markup().contains("data-value=\"1\""));

    controller.clear_all().unwrap();
    assert_eq!(fixture.dialogs.alerts().len(), 2);
    assert_eq!(fixture.local.get("x").as_deref(), Some("1"));

    fixture.local.fail_writes(false);
    controller.clear_all().unwrap();
    assert!(pairs(&fixture.local).is_empty());
    assert_eq!(fixture.dialogs.alerts().len(), 2);
}

/// Test that disabled cookies render an empty list without alerts
#[test]
fn test_disabled_cookies_are_silent() {
    let fixture = Fixture::new("a=1", &[], &[]);
    fixture.jar.set_enabled(false);
    fixture.dialogs.answer_confirm(Some(true));
    let mut plugin = fixture.plugin();

    plugin.on_show().unwrap();
    assert_eq!(fixture.surface.markup(), "");

    plugin.on_tool_click(ToolAction::Clear).unwrap();
    assert!(fixture.dialogs.alerts().is_empty());
}

/// Test that the list reflects external writes on refresh
#[test]
fn test_refresh_picks_up_external_changes() {
    let fixture = Fixture::new("", &[], &[]);
    let mut plugin = fixture.plugin();
    plugin.on_show().unwrap();
    plugin.on_top_bar_click(BackendKind::LocalStorage).unwrap();
    assert_eq!(fixture.surface.markup(), "");

    // Another tab writes behind the panel's back.
    let other_tab = NativeStoreBackend::local(fixture.local.clone());
    other_tab.set("late", "1").unwrap();
    assert_eq!(fixture.surface.markup(), "");

    plugin.on_tool_click(ToolAction::Refresh).unwrap();
    assert!(fixture.surface.markup().contains("data-name=\"late\""));
}

/// Test top bar and tool bar hooks
#[test]
fn test_host_buttons() {
    let fixture = Fixture::new("", &[], &[]);
    let mut plugin = fixture.plugin();

    let tabs = plugin.on_add_top_bar();
    let names: Vec<_> = tabs.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Cookies", "LocalStorage", "SessionStorage"]);
    assert_eq!(tabs[0].class_name, "vc-actived");
    assert_eq!(tabs[1].class_name, "");

    plugin.on_show().unwrap();
    assert!(!plugin.on_top_bar_click(BackendKind::Cookie).unwrap());
    assert!(plugin.on_top_bar_click(BackendKind::SessionStorage).unwrap());
    let tabs = plugin.on_add_top_bar();
    assert_eq!(tabs[2].class_name, "vc-actived");
    assert_eq!(tabs[0].class_name, "");

    let tools: Vec<_> = plugin.on_add_tool().iter().map(|t| (t.name, t.global)).collect();
    assert_eq!(tools, vec![("Refresh", false), ("Clear", false)]);

    assert!(plugin.on_render_tab().contains("class=\"vc-log\""));
}

/// Test the data shape handed to an external template function
#[test]
fn test_list_view_serialization() {
    let view = ListView {
        list: vec![StorageRecord::new("a", "1")],
        current_type: BackendKind::SessionStorage,
    };

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "list": [{ "name": "a", "value": "1" }],
            "currentType": "sessionstorage"
        })
    );
}

/// Test that markup-significant characters are escaped before rendering
#[test]
fn test_rendered_records_are_escaped() {
    let fixture = Fixture::new("", &[("<script>", "\"x\" & y")], &[]);
    let mut controller = fixture.controller();

    controller.select_backend(BackendKind::LocalStorage).unwrap();

    let markup = fixture.surface.markup();
    assert!(!markup.contains("<script>"));
    assert!(markup.contains("&lt;script&gt;"));
    assert!(markup.contains("&quot;x&quot; &amp; y"));
}
