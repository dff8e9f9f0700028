//! OAuth rate-limit utilization: 5-hour window always, 7-day windows on Max.

use chrono::{DateTime, Utc};

use super::{Widget, WidgetContext};
use crate::cache::UsageCache;
use crate::colors::{color_for_percent, paint, separator, warning_glyph};
use crate::config::Plan;
use crate::models::{UsageLimits, UsageWindow};
use crate::utils::format_time_remaining;

#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitsData {
    /// `None` when memory, disk and network all came up empty.
    pub limits: Option<UsageLimits>,
    pub plan: Plan,
    pub now: DateTime<Utc>,
}

pub struct RateLimitsWidget<'a> {
    cache: &'a UsageCache,
}

impl<'a> RateLimitsWidget<'a> {
    pub fn new(cache: &'a UsageCache) -> Self {
        Self { cache }
    }
}

fn percent_fragment(label: &str, window: &UsageWindow) -> String {
    let pct = window.percent();
    format!("{label}: {}", paint(&format!("{pct}%"), color_for_percent(pct)))
}

/// Renders already-resolved rate-limit data.
pub fn render_limits(data: &RateLimitsData, ctx: &WidgetContext<'_>) -> String {
    let Some(limits) = data.limits.as_ref() else {
        return warning_glyph();
    };
    let t = ctx.translations;
    let mut parts = Vec::new();

    if let Some(five) = limits.five_hour.as_ref() {
        let mut text = percent_fragment(t.labels.five_hour, five);
        if let Some(reset) = five.resets_at {
            text.push_str(&format!(" ({})", format_time_remaining(reset, data.now, t)));
        }
        parts.push(text);
    }

    if data.plan == Plan::Max {
        if let Some(seven) = limits.seven_day.as_ref() {
            parts.push(percent_fragment(t.labels.seven_day_all, seven));
        }
        if let Some(sonnet) = limits.seven_day_sonnet.as_ref() {
            parts.push(percent_fragment(t.labels.seven_day_sonnet, sonnet));
        }
    }

    parts.join(&separator())
}

impl Widget for RateLimitsWidget<'_> {
    type Data = RateLimitsData;

    fn id(&self) -> &'static str {
        "rateLimits"
    }

    fn get_data(&self, ctx: &WidgetContext<'_>) -> Option<RateLimitsData> {
        Some(RateLimitsData {
            limits: self.cache.fetch(ctx.config.ttl_seconds),
            plan: ctx.config.plan,
            now: Utc::now(),
        })
    }

    fn render(&self, data: &RateLimitsData, ctx: &WidgetContext<'_>) -> String {
        render_limits(data, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::i18n::EN;
    use crate::models::HookJson;
    use chrono::TimeDelta;

    fn window(utilization: f64, resets_at: Option<DateTime<Utc>>) -> UsageWindow {
        UsageWindow {
            utilization,
            resets_at,
        }
    }

    fn render(limits: Option<UsageLimits>, plan: Plan, now: DateTime<Utc>) -> String {
        let input = HookJson::default();
        let config = Config {
            plan,
            language: crate::config::Language::En,
            ..Config::default()
        };
        let ctx = WidgetContext::new(&input, &config);
        render_limits(&RateLimitsData { limits, plan, now }, &ctx)
    }

    fn full_limits(now: DateTime<Utc>) -> UsageLimits {
        UsageLimits {
            five_hour: Some(window(42.0, Some(now + TimeDelta::minutes(95)))),
            seven_day: Some(window(61.0, None)),
            seven_day_sonnet: Some(window(12.0, None)),
        }
    }

    #[test]
    fn missing_data_renders_warning() {
        assert_eq!(render(None, Plan::Max, Utc::now()), warning_glyph());
    }

    #[test]
    fn pro_plan_hides_seven_day_windows() {
        let now = Utc::now();
        let out = render(Some(full_limits(now)), Plan::Pro, now);
        assert!(out.contains(&format!("{}: ", EN.labels.five_hour)));
        assert!(out.contains("(1h35m)"));
        assert!(!out.contains(&format!("{}: ", EN.labels.seven_day_all)));
        assert!(!out.contains(EN.labels.seven_day_sonnet));
        assert!(!out.contains("61%"));
    }

    #[test]
    fn max_plan_shows_seven_day_windows() {
        let now = Utc::now();
        let out = render(Some(full_limits(now)), Plan::Max, now);
        assert!(out.contains(&percent_fragment("7d", &window(61.0, None))));
        assert!(out.contains(&percent_fragment("7d-S", &window(12.0, None))));
    }

    #[test]
    fn max_plan_omits_each_absent_window_independently() {
        let now = Utc::now();
        let mut limits = full_limits(now);
        limits.seven_day = None;
        let out = render(Some(limits), Plan::Max, now);
        assert!(!out.contains("7d:"));
        assert!(out.contains("7d-S:"));

        let mut limits = full_limits(now);
        limits.seven_day_sonnet = None;
        let out = render(Some(limits), Plan::Max, now);
        assert!(out.contains("7d:"));
        assert!(!out.contains("7d-S"));
    }

    #[test]
    fn five_hour_without_reset_has_no_countdown() {
        let now = Utc::now();
        let limits = UsageLimits {
            five_hour: Some(window(90.0, None)),
            ..UsageLimits::default()
        };
        let out = render(Some(limits), Plan::Pro, now);
        assert_eq!(out, percent_fragment("5h", &window(90.0, None)));
    }
}
