// Conversion of raw vendor push payloads into the canonical displayable
// notification plus an optional navigation intent. Pure: no capability calls,
// no state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{NavigationIntent, NormalizedNotification};

/// Key inside `data` naming the screen a notification wants to open.
pub const TARGET_SCREEN_KEY: &str = "targetScreen";

/// An inbound push payload as handed over by the platform delivery mechanism.
///
/// Vendor schemas differ: some nest title/body under a `notification` block,
/// some put them at the top level, and `data` values may be strings, numbers,
/// or objects. Only `data.targetScreen` carries meaning for this subsystem;
/// everything else is tolerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPayload {
    pub notification: Option<RawContent>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub data: Option<serde_json::Map<String, Value>>,
}

/// The nested `notification` block of a vendor payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContent {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Result of normalization: always a displayable notification, plus the
/// navigation intent when the payload carried a non-empty target screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub notification: NormalizedNotification,
    pub intent: Option<NavigationIntent>,
}

/// Normalize a raw payload.
///
/// Malformed content is never an error: missing fields default to empty
/// strings, a missing or empty `targetScreen` yields no intent, and
/// non-string `data` values are dropped without coercion.
pub fn normalize(raw: &RawPayload) -> NormalizedPayload {
    let title = raw
        .notification
        .as_ref()
        .and_then(|content| content.title.clone())
        .or_else(|| raw.title.clone())
        .unwrap_or_default();
    let body = raw
        .notification
        .as_ref()
        .and_then(|content| content.body.clone())
        .or_else(|| raw.body.clone())
        .unwrap_or_default();

    let mut data = HashMap::new();
    let mut dropped = 0usize;
    if let Some(entries) = raw.data.as_ref() {
        for (key, value) in entries {
            match value {
                Value::String(text) => {
                    data.insert(key.clone(), text.clone());
                },
                _ => dropped += 1,
            }
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped non-string data entries during normalization");
    }

    // Empty target screen is treated the same as an absent one.
    let intent = data
        .get(TARGET_SCREEN_KEY)
        .filter(|path| !path.is_empty())
        .map(|path| {
            let mut params = data.clone();
            params.remove(TARGET_SCREEN_KEY);
            NavigationIntent {
                target_path: path.clone(),
                params,
            }
        });

    NormalizedPayload {
        notification: NormalizedNotification { title, body, data },
        intent,
    }
}
