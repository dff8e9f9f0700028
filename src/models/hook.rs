use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookWorkspace {
    #[serde(default)]
    pub current_dir: Option<String>,
}

/// Token counts for the most recent request; `null` until the first response.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
}

impl CurrentUsage {
    /// Tokens occupying the context window: fresh input plus both cache kinds.
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.cache_creation_input_tokens)
            .saturating_add(self.cache_read_input_tokens)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookContextWindow {
    #[serde(default)]
    pub context_window_size: u64,
    #[serde(default)]
    pub current_usage: Option<CurrentUsage>,
}

/// Optional cost summary provided by Claude Code's statusLine input
#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookCost {
    #[serde(default)]
    pub total_cost_usd: f64,
}

/// Session snapshot piped to the statusline on stdin.
///
/// Every section is optional so that a partial payload still renders; only a
/// document that fails to parse as JSON is rejected.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookJson {
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub model: Option<HookModel>,
    #[serde(default)]
    pub workspace: Option<HookWorkspace>,
    #[serde(default)]
    pub context_window: Option<HookContextWindow>,
    #[serde(default)]
    pub cost: Option<HookCost>,
}

impl HookJson {
    /// Working directory, preferring `workspace.current_dir` over the top-level `cwd`.
    pub fn current_dir(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .and_then(|w| w.current_dir.as_deref())
            .or(self.cwd.as_deref())
            .filter(|d| !d.trim().is_empty())
    }

    pub fn total_cost_usd(&self) -> f64 {
        self.cost.as_ref().map(|c| c.total_cost_usd).unwrap_or(0.0)
    }
}
