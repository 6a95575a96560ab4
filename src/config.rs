//! Site configuration: server address, music source, timing and page copy.
//!
//! The record is embedded from `assets/site.json` at compile time. Any field
//! missing from the file keeps its built-in default.

use dioxus::logger::tracing::warn;
use serde::Deserialize;

const SITE_JSON: &str = include_str!("../assets/site.json");

pub const DEFAULT_SERVER_ADDRESS: &str = "play.corpssmp.lol";
pub const DEFAULT_MUSIC_URL: &str = "https://files.catbox.moe/su3mg2.mp3";
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.3;
pub const DEFAULT_PLAYBACK_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2_000;

/// How much detail failure banners expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorVerbosity {
    /// Classified, specific reasons ("Network error - external audio file blocked").
    #[default]
    Detailed,
    /// One generic message per failure channel.
    Brief,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinStep {
    pub icon: String,
    pub title: String,
    /// May contain `{address}`.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleCard {
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutboundLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server_name: String,
    /// Copied verbatim into the player's clipboard.
    pub server_address: String,
    pub taglines: Vec<String>,
    pub music_url: String,
    pub music_volume: f64,
    pub playback_timeout_ms: u32,
    pub copy_feedback_ms: u32,
    pub error_verbosity: ErrorVerbosity,
    pub join_steps: Vec<JoinStep>,
    pub rules: Vec<RuleCard>,
    pub links: Vec<OutboundLink>,
    pub footer_credit: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server_name: "CorpsSmp".to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            taglines: vec![
                "Where friendships bloom and adventures never end".to_string(),
                "A place where every block tells a story, every build holds a memory".to_string(),
                "Join our peaceful community and create something beautiful together".to_string(),
            ],
            music_url: DEFAULT_MUSIC_URL.to_string(),
            music_volume: DEFAULT_MUSIC_VOLUME,
            playback_timeout_ms: DEFAULT_PLAYBACK_TIMEOUT_MS,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            error_verbosity: ErrorVerbosity::Detailed,
            join_steps: vec![
                JoinStep {
                    icon: "gamepad".to_string(),
                    title: "Open Minecraft".to_string(),
                    description: "Launch your Minecraft Java Edition client".to_string(),
                },
                JoinStep {
                    icon: "server".to_string(),
                    title: "Add Server".to_string(),
                    description: "Click \"Multiplayer\" then \"Add Server\" and enter: {address}"
                        .to_string(),
                },
                JoinStep {
                    icon: "zap".to_string(),
                    title: "Start Playing!".to_string(),
                    description: "Join our community and begin your adventure".to_string(),
                },
            ],
            rules: vec![
                RuleCard {
                    icon: "heart".to_string(),
                    title: "Play Peacefully".to_string(),
                    description:
                        "Embrace the spirit of cooperation and kindness in all your interactions"
                            .to_string(),
                    tone: "accent".to_string(),
                },
                RuleCard {
                    icon: "users".to_string(),
                    title: "Respect Everyone".to_string(),
                    description:
                        "Treat all players with dignity and create a welcoming environment for all"
                            .to_string(),
                    tone: "secondary".to_string(),
                },
                RuleCard {
                    icon: "shield".to_string(),
                    title: "Protect Builds".to_string(),
                    description:
                        "Never break or grief anyone's creations - it may result in a ban"
                            .to_string(),
                    tone: "primary".to_string(),
                },
            ],
            links: vec![
                OutboundLink {
                    label: "Updates".to_string(),
                    href: "https://t.me/CorpsSmp".to_string(),
                    tone: "secondary".to_string(),
                },
                OutboundLink {
                    label: "Contact".to_string(),
                    href: "https://t.me/EternalAura".to_string(),
                    tone: "accent".to_string(),
                },
            ],
            footer_credit: "with Rio.".to_string(),
        }
    }
}

impl SiteConfig {
    /// The configuration embedded in the binary.
    pub fn load() -> Self {
        Self::parse(SITE_JSON)
    }

    /// Parse a JSON site record, falling back to defaults when it is malformed.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<SiteConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(err) => {
                warn!("site config is invalid, using defaults: {err}");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.server_address = self.server_address.trim().to_string();
        if self.server_address.is_empty() {
            self.server_address = DEFAULT_SERVER_ADDRESS.to_string();
        }
        if !self.music_volume.is_finite() {
            self.music_volume = DEFAULT_MUSIC_VOLUME;
        }
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if self.playback_timeout_ms == 0 {
            self.playback_timeout_ms = DEFAULT_PLAYBACK_TIMEOUT_MS;
        }
        if self.copy_feedback_ms == 0 {
            self.copy_feedback_ms = DEFAULT_COPY_FEEDBACK_MS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_the_live_server() {
        let config = SiteConfig::load();
        assert_eq!(config.server_address, "play.corpssmp.lol");
        assert_eq!(config.music_volume, 0.3);
        assert_eq!(config.playback_timeout_ms, 5_000);
        assert_eq!(config.copy_feedback_ms, 2_000);
        assert_eq!(config.join_steps.len(), 3);
        assert_eq!(config.rules.len(), 3);
    }

    #[test]
    fn partial_records_keep_defaults() {
        let config = SiteConfig::parse(r#"{ "error_verbosity": "brief" }"#);
        assert_eq!(config.error_verbosity, ErrorVerbosity::Brief);
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.links.len(), 2);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let config = SiteConfig::parse(
            r#"{ "server_address": "  ", "music_volume": 4.0, "playback_timeout_ms": 0, "copy_feedback_ms": 0 }"#,
        );
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.music_volume, 1.0);
        assert_eq!(config.playback_timeout_ms, DEFAULT_PLAYBACK_TIMEOUT_MS);
        assert_eq!(config.copy_feedback_ms, DEFAULT_COPY_FEEDBACK_MS);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        assert_eq!(SiteConfig::parse("{ not json"), SiteConfig::default());
    }

    #[test]
    fn unknown_verbosity_is_rejected_as_a_whole() {
        let config = SiteConfig::parse(r#"{ "error_verbosity": "chatty", "server_address": "x" }"#);
        assert_eq!(config, SiteConfig::default());
    }
}
