use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rate-limit window as reported by the OAuth usage endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageWindow {
    /// Percentage in `[0, 100]`.
    pub utilization: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub resets_at: Option<DateTime<Utc>>,
}

impl UsageWindow {
    /// Utilization rounded to a whole percent and clamped to `[0, 100]`.
    pub fn percent(&self) -> u8 {
        if !self.utilization.is_finite() {
            return 0;
        }
        self.utilization.round().clamp(0.0, 100.0) as u8
    }
}

/// Snapshot of all rate-limit windows. Always replaced as a whole, never patched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageLimits {
    #[serde(default)]
    pub five_hour: Option<UsageWindow>,
    #[serde(default)]
    pub seven_day: Option<UsageWindow>,
    #[serde(default)]
    pub seven_day_sonnet: Option<UsageWindow>,
}

impl UsageLimits {
    /// Builds limits from an arbitrary JSON body, keeping each window only when
    /// it is well formed. A malformed window never poisons its siblings.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let window = |key: &str| {
            value
                .get(key)
                .filter(|v| !v.is_null())
                .and_then(|v| serde_json::from_value::<UsageWindow>(v.clone()).ok())
        };
        UsageLimits {
            five_hour: window("five_hour"),
            seven_day: window("seven_day"),
            seven_day_sonnet: window("seven_day_sonnet"),
        }
    }
}

/// Accepts RFC 3339 strings, `null`, or garbage; anything unparseable becomes `None`.
fn deserialize_lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
