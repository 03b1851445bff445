//! Provider API-key settings.
//!
//! The settings screen collects keys for the generation providers the
//! platform would call if generation were real. Keys are held in memory
//! only; saving logs the action and nothing reads them back out in
//! clear text.

use serde::{Deserialize, Serialize};

/// API keys entered on the settings screen. Empty string means unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub gemini_key: String,
    #[serde(default)]
    pub imagen3_key: String,
    #[serde(default)]
    pub veo_key: String,
    #[serde(default)]
    pub youtube_key: String,
}

/// What the settings screen gets back: which keys are configured, never
/// the key material itself.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsSummary {
    pub gemini_key_set: bool,
    pub imagen3_key_set: bool,
    pub veo_key_set: bool,
    pub youtube_key_set: bool,
}

impl ProviderSettings {
    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            gemini_key_set: !self.gemini_key.trim().is_empty(),
            imagen3_key_set: !self.imagen3_key.trim().is_empty(),
            veo_key_set: !self.veo_key.trim().is_empty(),
            youtube_key_set: !self.youtube_key.trim().is_empty(),
        }
    }
}
