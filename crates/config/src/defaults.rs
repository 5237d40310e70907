//! `#[serde(default = ...)]` functions.
//!
//! Values owned by another crate are read from that crate's constants.

use price_feed::{extract, refresh, source, DailySchedule};

pub fn default_service_name() -> String {
    "goldfeed".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    server::DEFAULT_PORT
}

pub fn default_source_url() -> String {
    refresh::DEFAULT_SOURCE_URL.to_string()
}

pub fn default_row_selector() -> String {
    extract::DEFAULT_ROW_SELECTOR.to_string()
}

pub fn default_target_label() -> String {
    refresh::DEFAULT_TARGET_LABEL.to_string()
}

pub fn default_user_agent() -> String {
    source::DEFAULT_USER_AGENT.to_string()
}

pub fn default_source_timeout_seconds() -> u64 {
    source::DEFAULT_TIMEOUT.as_secs()
}

pub fn default_enabled() -> bool {
    true
}

pub fn default_daily_at() -> String {
    DailySchedule::default().to_string()
}

pub fn default_ai_model() -> String {
    advisor::gemini::DEFAULT_MODEL.to_string()
}

pub fn default_ai_base_url() -> String {
    advisor::gemini::DEFAULT_BASE_URL.to_string()
}

pub fn default_ai_timeout_seconds() -> u64 {
    advisor::gemini::DEFAULT_TIMEOUT.as_secs()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_owning_crates() {
        let feed = price_feed::FeedSettings::default();
        assert_eq!(default_source_url(), feed.source_url);
        assert_eq!(default_row_selector(), feed.row_selector);
        assert_eq!(default_target_label(), feed.target_label);

        let ai = advisor::GeminiSettings::new("key");
        assert_eq!(default_ai_model(), ai.model);
        assert_eq!(default_ai_base_url(), ai.base_url);
        assert_eq!(default_ai_timeout_seconds(), ai.timeout.as_secs());

        assert_eq!(default_port(), 3000);
        assert_eq!(default_daily_at(), "03:00");
        assert_eq!(default_source_timeout_seconds(), 30);
    }
}
