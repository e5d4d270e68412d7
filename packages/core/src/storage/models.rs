// Модели данных для хранилищ

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PanelError, Result as PanelResult};

/// Запись хранилища: the name/value pair every backend lists.
///
/// Produced fresh by each `list()`; a change is always a set or delete by
/// name, never an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub name: String,
    pub value: String,
}

impl StorageRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Тип хранилища
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    #[serde(rename = "cookies")]
    Cookie,
    #[serde(rename = "localstorage")]
    LocalStorage,
    #[serde(rename = "sessionstorage")]
    SessionStorage,
}

impl BackendKind {
    /// Tab order
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Cookie,
        BackendKind::LocalStorage,
        BackendKind::SessionStorage,
    ];

    /// Identifier used in `data-type` and the render data
    pub fn type_id(&self) -> &'static str {
        match self {
            BackendKind::Cookie => "cookies",
            BackendKind::LocalStorage => "localstorage",
            BackendKind::SessionStorage => "sessionstorage",
        }
    }

    /// Human label shown on the tab and in the clear confirmation
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Cookie => "Cookies",
            BackendKind::LocalStorage => "LocalStorage",
            BackendKind::SessionStorage => "SessionStorage",
        }
    }

    /// Prefix of the edit prompt
    pub fn prompt_label(&self) -> &'static str {
        match self {
            BackendKind::Cookie => "cookie",
            BackendKind::LocalStorage => "localStorage",
            BackendKind::SessionStorage => "sessionStorage",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_id())
    }
}

impl FromStr for BackendKind {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::ALL
            .into_iter()
            .find(|kind| kind.type_id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PanelError::InvalidInput(format!("unknown storage type: {}", s)))
    }
}

/// Срок жизни cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Expires this many days from now
    Days(i64),
    /// Expires at a fixed moment
    At(DateTime<Utc>),
    /// No `expires` attribute: the cookie lives for the browser session
    Session,
    /// Already expired; writing it removes the cookie
    Expired,
}

impl Expiry {
    /// Lifetime in days as configured; `0` means a session cookie
    pub fn from_days(days: i64) -> Self {
        if days == 0 {
            Expiry::Session
        } else {
            Expiry::Days(days)
        }
    }

    /// Resolve to the `expires` date relative to `now`
    pub fn expires_at(&self, now: DateTime<Utc>) -> PanelResult<Option<DateTime<Utc>>> {
        match self {
            Expiry::Days(days) => Duration::try_days(*days)
                .and_then(|delta| now.checked_add_signed(delta))
                .map(Some)
                .ok_or_else(|| {
                    PanelError::InvalidInput(format!("cookie expiry out of range: {} days", days))
                }),
            Expiry::At(at) => Ok(Some(*at)),
            Expiry::Session => Ok(None),
            Expiry::Expired => Ok(Some(
                now.checked_sub_signed(Duration::seconds(86_400))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            )),
        }
    }
}
