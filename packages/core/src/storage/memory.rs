// In-memory хранилища для тестов и non-WASM платформ
//
// Both fakes are cheap-clone handles over shared state, so a test can keep
// one clone for assertions while the backend owns another.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{PanelError, Result};
use crate::storage::cookie::CookieJar;
use crate::storage::native::KeyValueStore;
use crate::utils::time::{now, parse_cookie_date};

#[derive(Debug)]
struct JarState {
    cookies: Vec<(String, String)>,
    enabled: bool,
    fail_writes: bool,
    last_write: Option<String>,
}

/// Cookie jar that interprets `document.cookie` assignments
#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    inner: Rc<RefCell<JarState>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(JarState {
                cookies: Vec::new(),
                enabled: true,
                fail_writes: false,
                last_write: None,
            })),
        }
    }

    /// Seed from a `document.cookie` style string
    pub fn from_cookie_string(raw: &str) -> Self {
        let jar = Self::new();
        {
            let mut state = jar.inner.borrow_mut();
            for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
                upsert(&mut state.cookies, name, value);
            }
        }
        jar
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().enabled = enabled;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Last string assigned through [`CookieJar::write`]
    pub fn last_write(&self) -> Option<String> {
        self.inner.borrow().last_write.clone()
    }

    /// Raw (still encoded) value of a cookie
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar for MemoryCookieJar {
    fn enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    fn read(&self) -> Result<String> {
        let state = self.inner.borrow();
        let rendered: Vec<String> = state
            .cookies
            .iter()
            .map(|(name, value)| {
                if name.is_empty() {
                    value.clone()
                } else {
                    format!("{}={}", name, value)
                }
            })
            .collect();
        Ok(rendered.join("; "))
    }

    fn write(&self, cookie: &str) -> Result<()> {
        let mut state = self.inner.borrow_mut();
        if state.fail_writes {
            return Err(PanelError::Platform("SecurityError".to_string()));
        }
        state.last_write = Some(cookie.to_string());

        let mut parts = cookie.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = pair.split_once('=').unwrap_or(("", pair));
        let (name, value) = (name.trim(), value.trim());

        let mut expired = false;
        for attribute in parts {
            let (key, val) = attribute.split_once('=').unwrap_or((attribute, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => {
                    if let Some(at) = parse_cookie_date(val) {
                        expired = at <= now();
                    }
                }
                "max-age" => {
                    if let Ok(seconds) = val.trim().parse::<i64>() {
                        expired = seconds <= 0;
                    }
                }
                _ => {}
            }
        }

        if expired {
            state.cookies.retain(|(n, _)| n != name);
        } else {
            upsert(&mut state.cookies, name, value);
        }
        Ok(())
    }
}

fn upsert(entries: &mut Vec<(String, String)>, name: &str, value: &str) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = value.to_string(),
        None => entries.push((name.to_string(), value.to_string())),
    }
}

#[derive(Debug)]
struct StoreState {
    entries: Vec<(String, String)>,
    available: bool,
    fail_writes: bool,
}

/// Key/value store with insertion-order enumeration
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreState {
                entries: Vec::new(),
                available: true,
                fail_writes: false,
            })),
        }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut state = store.inner.borrow_mut();
            for (name, value) in pairs {
                upsert(&mut state.entries, name, value);
            }
        }
        store
    }

    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    /// Make every mutation fail the way a full quota does
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.inner.borrow().entries.clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.inner.borrow().fail_writes {
            return Err(PanelError::Platform("QuotaExceededError".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        self.inner.borrow().available
    }

    fn len(&self) -> Result<usize> {
        Ok(self.inner.borrow().entries.len())
    }

    fn key(&self, index: usize) -> Result<Option<String>> {
        Ok(self
            .inner
            .borrow()
            .entries
            .get(index)
            .map(|(name, _)| name.clone()))
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        upsert(&mut self.inner.borrow_mut().entries, key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.inner.borrow_mut().entries.retain(|(n, _)| n != key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.check_writable()?;
        self.inner.borrow_mut().entries.clear();
        Ok(())
    }
}
