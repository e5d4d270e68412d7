// WASM bindings
//
// `StoragePanel` is what the host plugin glue instantiates. The plugin lives
// in an Rc<RefCell<_>> so the row click delegate can reach it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::config::Config;
use crate::error::PanelError;
use crate::panel::controller::{RowAction, StoragePanelController};
use crate::panel::plugin::{StoragePlugin, ToolAction};
use crate::panel::render::{BuiltinTemplateEngine, ListRenderer, TemplateEngine, TABBOX_TEMPLATE};
use crate::storage::backend::BackendSet;
use crate::storage::cookie::CookieBackend;
use crate::storage::models::BackendKind;
use crate::storage::native::NativeStoreBackend;
use crate::wasm::console;
use crate::wasm::web::{
    dom_error, BrowserDialogs, DocumentCookieJar, ElementSurface, JsTemplateEngine, WebStorage,
};

type JsResult<T> = Result<T, JsValue>;

#[wasm_bindgen]
pub struct StoragePanel {
    plugin: Rc<RefCell<StoragePlugin>>,
    tabbox: Element,
    container: Element,
}

#[wasm_bindgen]
impl StoragePanel {
    /// `render(template, data)` and `escape(text)` are optional; the built-in
    /// table markup and HTML escaping are used without them.
    #[wasm_bindgen(constructor)]
    pub fn new(
        render: Option<js_sys::Function>,
        escape: Option<js_sys::Function>,
    ) -> JsResult<StoragePanel> {
        console_error_panic_hook::set_once();
        console::init_logging();

        let config = Config::global();
        let window = web_sys::window().ok_or_else(|| PanelError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PanelError::Dom("no document".to_string()))?;

        let wrapper = document.create_element("div").map_err(dom_error)?;
        wrapper.set_inner_html(TABBOX_TEMPLATE);
        let tabbox = wrapper
            .first_element_child()
            .ok_or_else(|| PanelError::Dom("empty tab template".to_string()))?;
        let container = tabbox
            .query_selector(&config.list_container_selector)
            .map_err(dom_error)?
            .ok_or_else(|| {
                PanelError::Dom(format!("{} not found", config.list_container_selector))
            })?;

        let engine: Box<dyn TemplateEngine> = match render {
            Some(render) => Box::new(JsTemplateEngine::new(render, escape)),
            None => Box::new(BuiltinTemplateEngine),
        };

        let backends = BackendSet::new(
            Box::new(CookieBackend::new(DocumentCookieJar::new(&window))),
            Box::new(NativeStoreBackend::local(WebStorage::local(&window))),
            Box::new(NativeStoreBackend::session(WebStorage::session(&window))),
        );

        let controller = StoragePanelController::new(
            backends,
            ListRenderer::new(engine),
            Box::new(BrowserDialogs::new(window.clone())),
            Box::new(ElementSurface::new(container.clone())),
        );

        Ok(StoragePanel {
            plugin: Rc::new(RefCell::new(StoragePlugin::new(controller))),
            tabbox,
            container,
        })
    }

    #[wasm_bindgen(js_name = onRenderTab)]
    pub fn on_render_tab(&self) -> Element {
        self.tabbox.clone()
    }

    #[wasm_bindgen(js_name = onAddTopBar)]
    pub fn on_add_top_bar(&self) -> JsResult<JsValue> {
        let buttons = self.plugin.borrow().on_add_top_bar();
        Ok(serde_wasm_bindgen::to_value(&buttons)?)
    }

    /// Returns `false` when the tab was already active.
    #[wasm_bindgen(js_name = onTopBarClick)]
    pub fn on_top_bar_click(&self, storage_type: String) -> JsResult<bool> {
        let kind: BackendKind = storage_type.parse()?;
        Ok(self.plugin.borrow_mut().on_top_bar_click(kind)?)
    }

    #[wasm_bindgen(js_name = onAddTool)]
    pub fn on_add_tool(&self) -> JsResult<JsValue> {
        let tools = self.plugin.borrow().on_add_tool();
        Ok(serde_wasm_bindgen::to_value(&tools)?)
    }

    #[wasm_bindgen(js_name = onToolClick)]
    pub fn on_tool_click(&self, name: String) -> JsResult<()> {
        let action: ToolAction = name.parse()?;
        Ok(self.plugin.borrow_mut().on_tool_click(action)?)
    }

    #[wasm_bindgen(js_name = onReady)]
    pub fn on_ready(&self) {
        self.plugin.borrow_mut().on_ready();
    }

    #[wasm_bindgen(js_name = onShow)]
    pub fn on_show(&self) -> JsResult<()> {
        let first_show = self.plugin.borrow_mut().on_show()?;
        if first_show {
            self.bind_row_actions()?;
        }
        Ok(())
    }

    pub fn refresh(&self) -> JsResult<()> {
        Ok(self.plugin.borrow_mut().controller_mut().refresh()?)
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) -> JsResult<bool> {
        Ok(self.plugin.borrow_mut().controller_mut().clear_all()?)
    }

    #[wasm_bindgen(js_name = currentType)]
    pub fn current_type(&self) -> Option<String> {
        self.plugin
            .borrow()
            .controller()
            .current_kind()
            .map(|kind| kind.type_id().to_string())
    }
}

impl StoragePanel {
    /// One delegated listener on the list container. Name and value are read
    /// from the clicked button, so each click sees the current render.
    fn bind_row_actions(&self) -> Result<(), PanelError> {
        let plugin = Rc::clone(&self.plugin);
        let selector = Config::global().row_button_selector.clone();

        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(button) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(&selector).ok().flatten())
            else {
                return;
            };

            let class_name = button.class_name();
            let Some(action) = RowAction::from_classes(class_name.split_whitespace()) else {
                return;
            };
            event.prevent_default();

            let name = button.get_attribute("data-name").unwrap_or_default();
            let value = button.get_attribute("data-value").unwrap_or_default();

            let Ok(mut plugin) = plugin.try_borrow_mut() else {
                console::error("storage panel busy, click ignored");
                return;
            };
            if let Err(e) = plugin.on_row_action(action, &name, &value) {
                console::error(&e.to_string());
            }
        }) as Box<dyn FnMut(Event)>);

        self.container
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        closure.forget();

        Ok(())
    }
}
