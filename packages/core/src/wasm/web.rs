// Адаптеры браузерных API
//
// Thin wrappers giving `document.cookie`, Web Storage, modal dialogs, the list
// container and a JS template function the crate's trait surfaces.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, Navigator, Storage, Window};

use crate::error::{PanelError, Result};
use crate::panel::dialogs::Dialogs;
use crate::panel::render::{escape_html, ListView, TemplateEngine};
use crate::panel::surface::ListSurface;
use crate::storage::cookie::CookieJar;
use crate::storage::native::KeyValueStore;

/// Message of a thrown JS value
pub fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

pub fn dom_error(value: JsValue) -> PanelError {
    PanelError::Dom(js_reason(&value))
}

pub struct DocumentCookieJar {
    navigator: Navigator,
    document: Option<HtmlDocument>,
}

impl DocumentCookieJar {
    pub fn new(window: &Window) -> Self {
        Self {
            navigator: window.navigator(),
            document: window
                .document()
                .and_then(|document| document.dyn_into::<HtmlDocument>().ok()),
        }
    }

    fn document(&self) -> Result<&HtmlDocument> {
        self.document
            .as_ref()
            .ok_or_else(|| PanelError::Unavailable("document".to_string()))
    }
}

impl CookieJar for DocumentCookieJar {
    fn enabled(&self) -> bool {
        self.document.is_some() && self.navigator.cookie_enabled()
    }

    fn read(&self) -> Result<String> {
        self.document()?
            .cookie()
            .map_err(|e| PanelError::read_failed("document.cookie", js_reason(&e)))
    }

    fn write(&self, cookie: &str) -> Result<()> {
        self.document()?
            .set_cookie(cookie)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }
}

/// `window.localStorage` or `window.sessionStorage`. Accessing either can
/// throw (storage disabled, opaque origin); that leaves the store unavailable.
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn local(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    pub fn session(window: &Window) -> Self {
        Self {
            storage: window.session_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| PanelError::Unavailable("Web Storage".to_string()))
    }
}

impl KeyValueStore for WebStorage {
    fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn len(&self) -> Result<usize> {
        self.storage()?
            .length()
            .map(|len| len as usize)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }

    fn key(&self, index: usize) -> Result<Option<String>> {
        self.storage()?
            .key(index as u32)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }

    fn clear(&self) -> Result<()> {
        self.storage()?
            .clear()
            .map_err(|e| PanelError::Platform(js_reason(&e)))
    }
}

pub struct BrowserDialogs {
    window: Window,
}

impl BrowserDialogs {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Dialogs for BrowserDialogs {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }

    // Hosts that stub out `window.confirm` make the call throw.
    fn confirm(&self, message: &str) -> Option<bool> {
        self.window.confirm_with_message(message).ok()
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            super::console::error(&format!("alert failed: {}", js_reason(&e)));
        }
    }
}

/// The `.vc-log` container
pub struct ElementSurface {
    container: Element,
}

impl ElementSurface {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl ListSurface for ElementSurface {
    fn replace(&mut self, markup: &str) {
        self.container.set_inner_html(markup);
    }
}

/// Host-provided `render(template, data)` and optional `escape(text)`
pub struct JsTemplateEngine {
    render: js_sys::Function,
    escape: Option<js_sys::Function>,
}

impl JsTemplateEngine {
    pub fn new(render: js_sys::Function, escape: Option<js_sys::Function>) -> Self {
        Self { render, escape }
    }
}

impl TemplateEngine for JsTemplateEngine {
    fn render(&self, template: &str, data: &ListView) -> Result<String> {
        let data = serde_wasm_bindgen::to_value(data)?;
        let markup = self
            .render
            .call2(&JsValue::NULL, &JsValue::from_str(template), &data)
            .map_err(|e| PanelError::Render(js_reason(&e)))?;

        markup
            .as_string()
            .ok_or_else(|| PanelError::Render("render() did not return a string".to_string()))
    }

    fn escape(&self, text: &str) -> String {
        self.escape
            .as_ref()
            .and_then(|escape| escape.call1(&JsValue::NULL, &JsValue::from_str(text)).ok())
            .and_then(|escaped| escaped.as_string())
            .unwrap_or_else(|| escape_html(text))
    }
}
