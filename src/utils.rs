use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::io::Read;
use std::path::PathBuf;

use crate::colors::{color_for_percent, paint};
use crate::i18n::Translations;

pub const PROGRESS_BAR_WIDTH: usize = 10;

static MODEL_FAMILY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(opus|sonnet|haiku)\b").expect("valid model family regex"));

/// `~/.claude`, the directory Claude Code keeps its settings and credentials in.
pub fn claude_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".claude"))
}

/// Custom Claude config dir from `CLAUDE_CONFIG_DIR`, if set and non-empty.
pub fn claude_config_dir_override() -> Option<String> {
    env::var("CLAUDE_CONFIG_DIR")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `1.5M`, `12.3k`, or the plain count below a thousand.
///
/// The unit is picked after rounding to one decimal, so `999_950` is `1.0M`.
pub fn format_tokens(n: u64) -> String {
    let kilo = (n as f64 / 100.0).round() / 10.0;
    if kilo >= 1000.0 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{kilo:.1}k")
    } else {
        n.to_string()
    }
}

/// Dollar amount with two decimals, three below one cent so tiny sessions are not `$0.00`.
pub fn format_cost(usd: f64) -> String {
    if usd > 0.0 && usd < 0.01 {
        format!("${usd:.3}")
    } else {
        format!("${usd:.2}")
    }
}

/// Time until `reset` as `XhYm` or `Ym` in the active language.
pub fn format_time_remaining(reset: DateTime<Utc>, now: DateTime<Utc>, t: &Translations) -> String {
    let minutes = (reset - now).num_minutes().max(0);
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}{}{mins}{}", t.time.hours, t.time.minutes)
    } else {
        format!("{mins}{}", t.time.minutes)
    }
}

/// `round(100 * current / total)` clamped to `[0, 100]`; zero when `total` is zero.
pub fn calculate_percent(current: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (current as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Fixed-width bar, colored by the same thresholds as the percentage.
pub fn render_progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled)
    );
    paint(&bar, color_for_percent(percent as u8))
}

/// Reduces a display name like `Claude Opus 4.5` to its family (`Opus`).
pub fn shorten_model_name(display_name: &str) -> String {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    if let Some(m) = MODEL_FAMILY_RE.captures(trimmed).and_then(|c| c.get(1)) {
        let family = m.as_str().to_ascii_lowercase();
        let mut chars = family.chars();
        return match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => family,
        };
    }
    trimmed
        .strip_prefix("Claude ")
        .unwrap_or(trimmed)
        .to_string()
}
