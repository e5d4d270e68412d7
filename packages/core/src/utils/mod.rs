// Вспомогательные утилиты

pub mod encoding;
pub mod time;
