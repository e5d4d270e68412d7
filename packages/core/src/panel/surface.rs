// Контейнер списка

use std::cell::RefCell;
use std::rc::Rc;

/// Stable list container. Each render replaces its whole content.
pub trait ListSurface {
    fn replace(&mut self, markup: &str);
}

#[derive(Debug, Default)]
struct BufferState {
    markup: String,
    renders: usize,
}

/// Surface that keeps the markup in memory (native hosts, tests)
#[derive(Debug, Clone, Default)]
pub struct MarkupBuffer {
    inner: Rc<RefCell<BufferState>>,
}

impl MarkupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> String {
        self.inner.borrow().markup.clone()
    }

    /// Number of times the content has been replaced
    pub fn renders(&self) -> usize {
        self.inner.borrow().renders
    }
}

impl ListSurface for MarkupBuffer {
    fn replace(&mut self, markup: &str) {
        let mut state = self.inner.borrow_mut();
        state.markup = markup.to_string();
        state.renders += 1;
    }
}
