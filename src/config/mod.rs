use crate::core::error::GuideError;
use crate::gateway::gemini::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// A guide persona. Everything that distinguished the near-identical site
/// variants (name, city, prompt text, greeting, fallback line) lives here,
/// so a different guide is a config entry rather than a fork.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideProfile {
    pub name: String,
    pub city: String,
    pub title: String,
    pub tagline: String,
    pub personality: String,
    pub knowledge: String,
    /// Handle the guide points visitors at when they want a real tour.
    pub contact: String,
    /// Opening model turn of every conversation.
    pub greeting: String,
    /// Substitute model turn used when the generation endpoint fails.
    pub fallback: String,
}

impl Default for GuideProfile {
    fn default() -> Self {
        Self {
            name: "Alex".to_string(),
            city: "Chongqing".to_string(),
            title: "Native Storyteller & Insider Guide".to_string(),
            tagline: "The Soul of the 8D Mountain City".to_string(),
            personality: "Bold, helpful, street-smart, and proud. You speak perfect English \
                          but with a local soul."
                .to_string(),
            knowledge: "You know that GPS is useless here, where the best spicy 'fly \
                        restaurants' are, and why the 10th floor is also the ground floor."
                .to_string(),
            contact: "WeChat: Alex_CQ_Insider".to_string(),
            greeting: "Welcome. I'm Alex. Are you looking for the hidden side of Chongqing? \
                       Tell me what interests you most - food, architecture, or the stories \
                       between the alleys."
                .to_string(),
            fallback: "Lost signal in a Chongqing tunnel! Try again in a second.".to_string(),
        }
    }
}

impl GuideProfile {
    /// Render the fixed instruction text sent alongside every request.
    pub fn instruction(&self) -> String {
        format!(
            "You are '{}', a native of {} who knows the city street by street. \
             Personality: {} \
             Core knowledge: {} \
             Constraint: keep replies very short, two to three sentences at most. \
             Goal: be charming and knowledgeable, and if they want a deeper tour, \
             invite them to reach you at {}.",
            self.name, self.city, self.personality, self.knowledge, self.contact
        )
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub active_profile: Option<String>,
    pub gateway: GatewayConfig,
    pub profiles: HashMap<String, GuideProfile>,
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("alex".to_string(), GuideProfile::default());

        Self {
            active_profile: Some("alex".to_string()),
            gateway: GatewayConfig::default(),
            profiles,
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".guidechat")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn input_history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    pub fn load() -> Result<Config, GuideError> {
        let path = Self::config_path();
        if path.exists() {
            return Self::load_from(&path);
        }

        let config = Config::default();
        if let Err(e) = config.save(&path) {
            tracing::warn!("Could not write default configuration: {}", e);
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, GuideError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GuideError::Config(format!("Read {}: {}", path.display(), e)))?;
        serde_yml::from_str::<Config>(&contents)
            .map_err(|e| GuideError::Config(format!("Parse {}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), GuideError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_yml::to_string(self)?)?;
        Ok(())
    }

    /// Pick the persona: CLI flag first, then the configured default.
    pub fn resolve_profile(&self, flag: Option<&str>) -> Result<GuideProfile, GuideError> {
        match flag.or(self.active_profile.as_deref()) {
            Some(name) => self
                .profiles
                .get(name)
                .cloned()
                .ok_or_else(|| GuideError::Config(format!("Unknown profile: {}", name))),
            None => Ok(GuideProfile::default()),
        }
    }

    pub fn resolve_model(&self, flag: Option<&str>) -> String {
        flag.map(|model| model.to_string())
            .or_else(|| self.gateway.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Credentials come from the config file or, failing that, the
    /// environment. Missing keys surface later as an endpoint failure.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.gateway
            .api_key
            .clone()
            .or_else(|| env::var("GEMINI_API_KEY").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_its_active_profile() {
        let config = Config::default();
        let profile = config.resolve_profile(None).unwrap();
        assert_eq!(profile.name, "Alex");
    }

    #[test]
    fn profile_flag_overrides_active_profile() {
        let mut config = Config::default();
        let lisa = GuideProfile {
            name: "Lisa".to_string(),
            ..GuideProfile::default()
        };
        config.profiles.insert("lisa".to_string(), lisa);

        let profile = config.resolve_profile(Some("lisa")).unwrap();
        assert_eq!(profile.name, "Lisa");
    }

    #[test]
    fn unknown_profile_is_a_config_error() {
        let config = Config::default();
        let err = config.resolve_profile(Some("nobody")).unwrap_err();
        assert!(matches!(err, GuideError::Config(_)));
    }

    #[test]
    fn model_resolution_prefers_the_flag() {
        let mut config = Config::default();
        config.gateway.model = Some("configured-model".to_string());

        assert_eq!(config.resolve_model(Some("flag-model")), "flag-model");
        assert_eq!(config.resolve_model(None), "configured-model");

        config.gateway.model = None;
        assert_eq!(config.resolve_model(None), DEFAULT_MODEL);
    }

    #[test]
    fn configured_api_key_wins_over_environment() {
        let mut config = Config::default();
        config.gateway.api_key = Some("from-file".to_string());
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn instruction_carries_persona_and_contact() {
        let profile = GuideProfile::default();
        let instruction = profile.instruction();
        assert!(instruction.contains("Alex"));
        assert!(instruction.contains("Chongqing"));
        assert!(instruction.contains("Alex_CQ_Insider"));
        assert!(instruction.contains("two to three sentences"));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.gateway.model = Some("gemini-test".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.active_profile.as_deref(), Some("alex"));
        assert_eq!(loaded.gateway.model.as_deref(), Some("gemini-test"));
        assert_eq!(loaded.profiles["alex"].city, "Chongqing");
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let err = Config::load_from(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, GuideError::Config(_)));
    }
}
