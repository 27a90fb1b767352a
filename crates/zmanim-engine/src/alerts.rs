//! Emergency messages shown on the display ticker.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::clock::parse_instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub content: String,
    /// RFC 3339 creation time as stored.
    #[serde(default)]
    pub created_at: String,
}

impl EmergencyMessage {
    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        parse_instant(&self.created_at)
    }
}

/// Messages addressed to `city`, newest first. Messages with an unreadable
/// creation time sort after all dated ones, in input order.
pub fn messages_for_city<'a>(messages: &'a [EmergencyMessage], city: &str) -> Vec<&'a EmergencyMessage> {
    let mut selected: Vec<&EmergencyMessage> =
        messages.iter().filter(|m| m.city == city).collect();
    selected.sort_by(|a, b| match (a.created(), b.created()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    selected
}
