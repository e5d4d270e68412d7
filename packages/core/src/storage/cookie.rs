// Cookie хранилище
//
// There is no key/value API over the cookie jar: records are parsed out of
// the `document.cookie` string and every mutation is a single cookie write.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PanelError, Result};
use crate::storage::backend::StorageBackend;
use crate::storage::models::{BackendKind, Expiry, StorageRecord};
use crate::utils::encoding::{decode_component, encode_component};
use crate::utils::time::{format_cookie_date, now};

/// Platform cookie jar (`navigator.cookieEnabled` + `document.cookie`)
pub trait CookieJar {
    fn enabled(&self) -> bool;

    /// Read the whole `name=value; name=value` string
    fn read(&self) -> Result<String>;

    /// Write one cookie with its attributes
    fn write(&self, cookie: &str) -> Result<()>;
}

/// Attributes applied to every write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub path: String,
    pub expiry_days: i64,
}

impl CookieSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            domain: config.cookie_domain.clone(),
            path: config.cookie_path.clone(),
            expiry_days: config.cookie_expiry_days,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(Config::global())
    }
}

/// Split a cookie string into records.
///
/// Each segment splits on its first `=`; a segment without `=` is a name
/// with an empty value. A name that fails to decode keeps the whole segment
/// raw; a value that fails to decode stays raw under the decoded name.
pub fn parse_cookie_string(raw: &str) -> Vec<StorageRecord> {
    raw.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> StorageRecord {
    let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
    let name = name.strip_prefix(' ').unwrap_or(name);

    let decoded_name = match decode_component(name) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(cookie = name, error = %e, "Cookie segment left undecoded");
            return StorageRecord::new(name, value);
        }
    };

    match decode_component(value) {
        Ok(decoded_value) => StorageRecord::new(decoded_name, decoded_value),
        Err(e) => {
            warn!(cookie = %decoded_name, error = %e, "Cookie value left undecoded");
            StorageRecord::new(decoded_name, value)
        }
    }
}

/// Build the string assigned to `document.cookie`. The name is written as-is,
/// the value is percent-encoded.
pub fn build_cookie_string(
    name: &str,
    value: &str,
    expiry: Expiry,
    settings: &CookieSettings,
    now: DateTime<Utc>,
) -> Result<String> {
    let expires_at = expiry.expires_at(now)?;
    let mut cookie = format!("{}={}", name, encode_component(value));
    if let Some(domain) = &settings.domain {
        cookie.push_str(";domain=");
        cookie.push_str(domain);
    }
    if let Some(at) = expires_at {
        cookie.push_str(";expires=");
        cookie.push_str(&format_cookie_date(&at));
    }
    cookie.push_str(";path=");
    cookie.push_str(&settings.path);
    Ok(cookie)
}

pub struct CookieBackend<J: CookieJar> {
    jar: J,
    settings: CookieSettings,
    clock: fn() -> DateTime<Utc>,
}

impl<J: CookieJar> CookieBackend<J> {
    pub fn new(jar: J) -> Self {
        Self::with_settings(jar, CookieSettings::default())
    }

    pub fn with_settings(jar: J, settings: CookieSettings) -> Self {
        Self {
            jar,
            settings,
            clock: now,
        }
    }

    /// Replace the clock used to resolve expiry dates
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &CookieSettings {
        &self.settings
    }

    pub fn set_with_expiry(&self, name: &str, value: &str, expiry: Expiry) -> Result<()> {
        if !self.jar.enabled() {
            debug!(cookie = name, "Cookies disabled, write skipped");
            return Ok(());
        }

        let cookie = build_cookie_string(name, value, expiry, &self.settings, (self.clock)())?;
        self.jar
            .write(&cookie)
            .map_err(|e| PanelError::write_failed("document.cookie", e.into_reason()))
    }
}

impl<J: CookieJar> StorageBackend for CookieBackend<J> {
    fn kind(&self) -> BackendKind {
        BackendKind::Cookie
    }

    fn is_available(&self) -> bool {
        self.jar.enabled()
    }

    fn list(&self) -> Vec<StorageRecord> {
        if !self.jar.enabled() {
            debug!("Cookies disabled");
            return Vec::new();
        }

        match self.jar.read() {
            Ok(raw) => parse_cookie_string(&raw),
            Err(e) => {
                warn!(error = %e, "Failed to read cookies");
                Vec::new()
            }
        }
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.set_with_expiry(name, value, Expiry::from_days(self.settings.expiry_days))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.set_with_expiry(name, "", Expiry::Expired)
    }

    fn clear(&self) -> Result<()> {
        let records = self.list();
        info!(count = records.len(), "Clearing cookies");
        for record in records {
            self.delete(&record.name)?;
        }
        Ok(())
    }
}
