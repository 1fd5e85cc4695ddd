// src/config/sentiment.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};
use tracing::info;

use crate::analyze::{
    DynProvider, HttpProvider, IndonesianAnalyzer, LanguageMode, Lexicon, Method, MockProvider,
};
use crate::sentiment::SentimentAnalyzer;

pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_METHOD: &str = "SENTIMENT_METHOD";
pub const ENV_LANGUAGE: &str = "SENTIMENT_LANGUAGE";
pub const ENV_PROVIDER_API_KEY: &str = "SENTIMENT_PROVIDER_API_KEY";
pub const ENV_PROVIDER_TEST_MODE: &str = "PROVIDER_TEST_MODE";

fn default_timeout_ms() -> u64 {
    5_000
}

/// Which implementation backs a provider slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Http,
    Mock,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub endpoint: String,
    /// "ENV" means: read from SENTIMENT_PROVIDER_API_KEY.
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub language: LanguageMode,
    #[serde(default = "default_timeout_ms")]
    pub provider_timeout_ms: u64,
    /// Custom lexicon JSON; the embedded Indonesian lexicon when absent.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    /// Translation-based provider used inside the Indonesian analyzer.
    #[serde(default)]
    pub translation: ProviderConfig,
    /// Provider used directly for non-Indonesian text.
    #[serde(default)]
    pub english: ProviderConfig,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            language: LanguageMode::default(),
            provider_timeout_ms: default_timeout_ms(),
            lexicon_path: None,
            translation: ProviderConfig::default(),
            english: ProviderConfig::default(),
        }
    }
}

impl SentimentConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: SentimentConfig = toml::from_str(s)?;
        cfg.translation.resolve_api_key()?;
        cfg.english.resolve_api_key()?;
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sentiment config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing sentiment config {}", path.display()))
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $SENTIMENT_CONFIG_PATH (must exist)
    /// 2) config/sentiment.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = match env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(m) = env::var(ENV_METHOD) {
            self.method = m.parse()?;
        }
        if let Ok(l) = env::var(ENV_LANGUAGE) {
            self.language = l.parse()?;
        }
        if env::var(ENV_PROVIDER_TEST_MODE).is_ok_and(|v| v == "mock") {
            for slot in [&mut self.translation, &mut self.english] {
                slot.enabled = true;
                slot.kind = ProviderKind::Mock;
            }
        }
        Ok(())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms.max(1))
    }

    /// Build the analyzer. A malformed custom lexicon fails here, at startup.
    pub fn build_analyzer(&self) -> Result<SentimentAnalyzer> {
        let lexicon = match &self.lexicon_path {
            Some(p) => Arc::new(Lexicon::load_from_file(p)?),
            None => Lexicon::indonesian(),
        };
        let (pos, neg, mods, negs) = lexicon.sizes();
        let timeout = self.provider_timeout();

        let mut indonesian = IndonesianAnalyzer::new(self.method.indonesian_mode(), lexicon)
            .with_provider_timeout(timeout);
        if let Some(p) = self.translation.build("translation", "id", timeout)? {
            indonesian = indonesian.with_translation_provider(p);
        }

        let mut analyzer = SentimentAnalyzer::new(indonesian)
            .with_language(self.language)
            .with_provider_timeout(timeout);
        if let Some(p) = self.english.build("english", "en", timeout)? {
            analyzer = analyzer.with_english_provider(p);
        }

        info!(
            target: "sentiment",
            method = self.method.as_str(),
            language = ?self.language,
            translation = self.translation.enabled,
            english = self.english.enabled,
            lexicon = ?(pos, neg, mods, negs),
            "sentiment analyzer configured"
        );
        Ok(analyzer)
    }
}

impl ProviderConfig {
    fn resolve_api_key(&mut self) -> Result<()> {
        if self.enabled && self.api_key.trim().eq_ignore_ascii_case("env") {
            self.api_key = env::var(ENV_PROVIDER_API_KEY)
                .map_err(|_| anyhow!("Missing {ENV_PROVIDER_API_KEY} env var"))?;
        }
        Ok(())
    }

    fn build(
        &self,
        name: &'static str,
        language: &'static str,
        timeout: Duration,
    ) -> Result<Option<DynProvider>> {
        if !self.enabled {
            return Ok(None);
        }
        let provider: DynProvider = match self.kind {
            ProviderKind::Mock => Arc::new(MockProvider::neutral()),
            ProviderKind::Http => {
                if self.endpoint.trim().is_empty() {
                    anyhow::bail!("provider `{name}` is enabled but has no endpoint");
                }
                Arc::new(HttpProvider::new(
                    name,
                    self.endpoint.clone(),
                    self.api_key.clone(),
                    language,
                    timeout,
                )?)
            }
        };
        Ok(Some(provider))
    }
}
