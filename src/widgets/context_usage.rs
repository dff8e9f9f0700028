//! Context window fill: bar, percentage, token counts and session cost.

use super::{Widget, WidgetContext};
use crate::colors::{Color, color_for_percent, dim, paint, separator};
use crate::utils::{calculate_percent, format_cost, format_tokens, render_progress_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextTokens {
    pub current: u64,
    pub total: u64,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextUsageData {
    /// `None` until Claude Code has reported usage for the session.
    pub tokens: Option<ContextTokens>,
    pub cost_usd: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextUsageWidget;

impl Widget for ContextUsageWidget {
    type Data = ContextUsageData;

    fn id(&self) -> &'static str {
        "context"
    }

    fn get_data(&self, ctx: &WidgetContext<'_>) -> Option<ContextUsageData> {
        let window = ctx.input.context_window.as_ref();
        let tokens = window.and_then(|w| {
            let usage = w.current_usage?;
            let current = usage.context_tokens();
            Some(ContextTokens {
                current,
                total: w.context_window_size,
                percent: calculate_percent(current, w.context_window_size),
            })
        });
        Some(ContextUsageData {
            tokens,
            cost_usd: ctx.input.total_cost_usd(),
        })
    }

    fn render(&self, data: &ContextUsageData, ctx: &WidgetContext<'_>) -> String {
        let Some(tokens) = data.tokens else {
            return dim(ctx.translations.no_context);
        };

        let parts = [
            render_progress_bar(tokens.percent),
            paint(&format!("{}%", tokens.percent), color_for_percent(tokens.percent)),
            format!("{}/{}", format_tokens(tokens.current), format_tokens(tokens.total)),
            paint(&format_cost(data.cost_usd), Color::Yellow),
        ];
        parts.join(&separator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::SAFE;
    use crate::config::{Config, Language};
    use crate::i18n::EN;
    use crate::models::HookJson;

    fn resolve(raw: &str) -> (ContextUsageData, String) {
        let input: HookJson = serde_json::from_str(raw).unwrap();
        let config = Config {
            language: Language::En,
            ..Config::default()
        };
        let ctx = WidgetContext::new(&input, &config);
        let data = ContextUsageWidget.get_data(&ctx).unwrap();
        let out = ContextUsageWidget.render(&data, &ctx);
        (data, out)
    }

    #[test]
    fn null_usage_renders_no_context_message() {
        let (data, out) = resolve(
            r#"{"context_window": {"context_window_size": 200000, "current_usage": null}}"#,
        );
        assert!(data.tokens.is_none());
        assert_eq!(out, dim(EN.no_context));
        assert!(!out.contains('█'));
        assert!(!out.contains('░'));
    }

    #[test]
    fn half_full_window_is_safe() {
        let (data, out) = resolve(
            r#"{
                "context_window": {
                    "context_window_size": 1000,
                    "current_usage": {
                        "input_tokens": 500,
                        "output_tokens": 0,
                        "cache_creation_input_tokens": 0,
                        "cache_read_input_tokens": 0
                    }
                },
                "cost": {"total_cost_usd": 0.004}
            }"#,
        );
        let tokens = data.tokens.unwrap();
        assert_eq!(tokens.percent, 50);
        assert_eq!(color_for_percent(tokens.percent), SAFE);
        assert!(out.contains(&paint("50%", SAFE)));
        assert!(out.contains("500/1.0k"));
        assert!(out.contains("$0.004"));
    }

    #[test]
    fn cache_tokens_count_toward_context() {
        let (data, out) = resolve(
            r#"{
                "context_window": {
                    "context_window_size": 200000,
                    "current_usage": {
                        "input_tokens": 10000,
                        "output_tokens": 999999,
                        "cache_creation_input_tokens": 40000,
                        "cache_read_input_tokens": 120000
                    }
                },
                "cost": {"total_cost_usd": 2.5}
            }"#,
        );
        let tokens = data.tokens.unwrap();
        assert_eq!(tokens.current, 170_000);
        assert_eq!(tokens.percent, 85);
        assert!(out.contains("170.0k/200.0k"));
        assert!(out.contains("$2.50"));
    }

    #[test]
    fn zero_window_size_does_not_divide_by_zero() {
        let (data, _) = resolve(
            r#"{"context_window": {"context_window_size": 0, "current_usage": {"input_tokens": 5}}}"#,
        );
        assert_eq!(data.tokens.unwrap().percent, 0);
    }
}
