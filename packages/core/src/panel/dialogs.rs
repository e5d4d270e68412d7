// Модальные диалоги
//
// Every call blocks the UI context until the user answers.

/// `window.prompt` / `window.confirm` / `window.alert`
pub trait Dialogs {
    /// `None` when the prompt was dismissed
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    /// `None` when the host has no confirmation dialog
    fn confirm(&self, message: &str) -> Option<bool>;

    fn alert(&self, message: &str);
}
