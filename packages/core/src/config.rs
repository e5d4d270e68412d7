//! Централизованная конфигурация панели хранилищ
//!
//! Cookie attributes and DOM selectors live here so that every write is
//! scoped to the same statically configured domain and path.

use std::sync::OnceLock;

/// Browsers cap cookie lifetime at 400 days
pub const MAX_COOKIE_EXPIRY_DAYS: i64 = 400;

/// Глобальная конфигурация (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Основная структура конфигурации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // ============================================
    // COOKIE ПАРАМЕТРЫ
    // ============================================

    /// `domain` attribute written with every cookie. `None` writes host-only cookies.
    pub cookie_domain: Option<String>,

    /// `path` attribute written with every cookie
    pub cookie_path: String,

    /// Lifetime of a cookie written through the edit action (in days).
    /// `0` writes session cookies.
    pub cookie_expiry_days: i64,

    // ============================================
    // DOM
    // ============================================

    /// Stable container that receives the rendered list and the row delegate
    pub list_container_selector: String,

    /// Row buttons carrying `data-name` / `data-value`
    pub row_button_selector: String,
}

impl Config {
    /// Создать конфигурацию с дефолтными значениями
    pub fn default() -> Self {
        Self {
            cookie_domain: None,
            cookie_path: "/".to_string(),
            cookie_expiry_days: 1,

            list_container_selector: ".vc-log".to_string(),
            row_button_selector: ".vc-table-col-button".to_string(),
        }
    }

    /// Создать конфигурацию из переменных окружения
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STORAGE_PANEL_COOKIE_DOMAIN") {
            let val = val.trim();
            if !val.is_empty() {
                config.cookie_domain = Some(val.to_string());
            }
        }

        if let Ok(val) = std::env::var("STORAGE_PANEL_COOKIE_PATH") {
            if val.starts_with('/') {
                config.cookie_path = val;
            }
        }

        if let Ok(val) = std::env::var("STORAGE_PANEL_COOKIE_EXPIRY_DAYS") {
            if let Some(days) = parse_expiry_days(&val) {
                config.cookie_expiry_days = days;
            }
        }

        config
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Initializes with defaults on first access.
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию со значениями по умолчанию
    ///
    /// # Errors
    ///
    /// Returns an error if the global config was already initialized.
    pub fn init() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::default())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию из переменных окружения
    ///
    /// # Errors
    ///
    /// Returns an error if the global config was already initialized.
    pub fn init_from_env() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::from_env())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию с кастомным экземпляром
    ///
    /// # Errors
    ///
    /// Returns an error if the global config was already initialized.
    pub fn init_with(config: Config) -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| "Config already initialized")
    }

    /// Проверить, инициализирована ли глобальная конфигурация
    pub fn is_initialized() -> bool {
        GLOBAL_CONFIG.get().is_some()
    }
}

/// Accepts `0..=MAX_COOKIE_EXPIRY_DAYS`
fn parse_expiry_days(val: &str) -> Option<i64> {
    val.trim()
        .parse()
        .ok()
        .filter(|days| (0..=MAX_COOKIE_EXPIRY_DAYS).contains(days))
}
