// Вывод в консоль браузера

pub fn init_logging() {
    log("Storage panel WASM initialized");
}

pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}
