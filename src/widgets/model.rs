//! Model name with the reasoning-effort marker for Opus.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::{Widget, WidgetContext};
use crate::colors::{Color, paint};
use crate::utils::{claude_home, shorten_model_name};

pub const EFFORT_ENV_VAR: &str = "CLAUDE_CODE_EFFORT_LEVEL";
const FLAGSHIP: &str = "Opus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffortLevel {
    #[default]
    High,
    Medium,
    Low,
}

impl EffortLevel {
    /// Only the non-default levels are recognized; anything else is ignored.
    pub fn parse_non_default(value: &str) -> Option<Self> {
        match value {
            "medium" => Some(EffortLevel::Medium),
            "low" => Some(EffortLevel::Low),
            _ => None,
        }
    }

    pub fn suffix(self) -> Option<char> {
        match self {
            EffortLevel::High => None,
            EffortLevel::Medium => Some('M'),
            EffortLevel::Low => Some('L'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelData {
    pub id: String,
    pub display_name: String,
    pub effort: EffortLevel,
    /// Requests are routed to z.ai rather than Anthropic.
    pub zai_provider: bool,
}

#[derive(Debug, Clone)]
pub struct ModelWidget {
    settings_path: Option<PathBuf>,
}

impl Default for ModelWidget {
    fn default() -> Self {
        Self {
            settings_path: claude_home().map(|h| h.join("settings.json")),
        }
    }
}

impl ModelWidget {
    pub fn with_settings_path(path: Option<PathBuf>) -> Self {
        Self {
            settings_path: path,
        }
    }

    /// `settings.json` → `CLAUDE_CODE_EFFORT_LEVEL` → `high`.
    pub fn effort_level(&self) -> EffortLevel {
        self.effort_from_settings()
            .or_else(|| {
                env::var(EFFORT_ENV_VAR)
                    .ok()
                    .and_then(|v| EffortLevel::parse_non_default(v.trim()))
            })
            .unwrap_or_default()
    }

    fn effort_from_settings(&self) -> Option<EffortLevel> {
        let raw = fs::read_to_string(self.settings_path.as_ref()?).ok()?;
        let json: serde_json::Value = serde_json::from_str(&raw).ok()?;
        json.get("effortLevel")
            .and_then(|v| v.as_str())
            .and_then(EffortLevel::parse_non_default)
    }
}

fn is_zai_provider() -> bool {
    env::var("ANTHROPIC_BASE_URL")
        .map(|url| url.to_ascii_lowercase().contains("z.ai"))
        .unwrap_or(false)
}

impl Widget for ModelWidget {
    type Data = ModelData;

    fn id(&self) -> &'static str {
        "model"
    }

    fn get_data(&self, ctx: &WidgetContext<'_>) -> Option<ModelData> {
        let model = ctx.input.model.as_ref();
        let id = model.and_then(|m| m.id.clone()).unwrap_or_default();
        let display_name = model
            .and_then(|m| m.display_name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "-".to_string());

        Some(ModelData {
            id,
            display_name,
            effort: self.effort_level(),
            zai_provider: is_zai_provider(),
        })
    }

    fn render(&self, data: &ModelData, _ctx: &WidgetContext<'_>) -> String {
        let short = shorten_model_name(&data.display_name);
        let icon = if data.zai_provider { "🟠" } else { "🤖" };
        let suffix = match data.effort.suffix() {
            Some(letter) if short == FLAGSHIP => format!("({letter})"),
            _ => String::new(),
        };
        paint(&format!("{icon} {short}{suffix}"), Color::Cyan)
    }
}
