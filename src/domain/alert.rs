//! Monitoring alerts raised against the pipeline

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Prefix and timestamp format of generated alert ids
pub const ALERT_ID_PREFIX: &str = "alert-";
pub const ALERT_ID_FORMAT: &str = "%Y%m%d%H%M%S";

#[nutype(
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef, Display)
)]
pub struct AlertId(String);

/// Category of an alert, e.g. `latency` or `drift`
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef, Display)
)]
pub struct AlertKind(String);

/// Free-form alert description
///
/// Limited to 2000 characters.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Display)
)]
pub struct AlertMessage(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: AlertMessage,
    pub severity: AlertSeverity,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Raise an alert at `at`; its id is derived from the second it was raised
    pub fn raise(
        kind: AlertKind,
        message: AlertMessage,
        severity: AlertSeverity,
        at: DateTime<Utc>,
    ) -> Self {
        let id = format!("{ALERT_ID_PREFIX}{}", at.format(ALERT_ID_FORMAT));
        Self {
            id: AlertId::try_new(id).expect("generated alert ids are never empty"),
            kind,
            message,
            severity,
            created_at: at,
        }
    }

    /// The same alert with `-{ordinal}` appended to its id
    pub fn numbered(self, ordinal: usize) -> Self {
        let id = format!("{}-{ordinal}", self.id);
        Self {
            id: AlertId::try_new(id).expect("suffixed alert ids are never empty"),
            ..self
        }
    }
}
