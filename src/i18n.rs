//! Static translation tables.

use std::env;

use crate::config::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub five_hour: &'static str,
    pub seven_day_all: &'static str,
    pub seven_day_sonnet: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub hours: &'static str,
    pub minutes: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub labels: Labels,
    pub time: TimeUnits,
    pub no_context: &'static str,
}

pub static EN: Translations = Translations {
    labels: Labels {
        five_hour: "5h",
        seven_day_all: "7d",
        seven_day_sonnet: "7d-S",
    },
    time: TimeUnits {
        hours: "h",
        minutes: "m",
    },
    no_context: "No context yet",
};

pub static KO: Translations = Translations {
    labels: Labels {
        five_hour: "5시간",
        seven_day_all: "7일",
        seven_day_sonnet: "7일-S",
    },
    time: TimeUnits {
        hours: "시간",
        minutes: "분",
    },
    no_context: "컨텍스트 없음",
};

/// Resolves `auto` from the locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
pub fn resolve_language(language: Language) -> Language {
    match language {
        Language::Auto => {
            let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
                .iter()
                .filter_map(|key| env::var(key).ok())
                .find(|v| !v.trim().is_empty())
                .unwrap_or_default();
            if locale.to_ascii_lowercase().starts_with("ko") {
                Language::Ko
            } else {
                Language::En
            }
        }
        explicit => explicit,
    }
}

pub fn translations(language: Language) -> &'static Translations {
    match resolve_language(language) {
        Language::Ko => &KO,
        _ => &EN,
    }
}
