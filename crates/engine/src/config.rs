use serde::{Deserialize, Serialize};

/// Number of transcript candidates requested when the caller does not say.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Placeholder some hosts send instead of omitting an argument.
const NULL_ARGUMENT: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_results must be at least 1")]
    InvalidMaxResults,
    #[error("language must not be empty")]
    EmptyLanguage,
}

/// Immutable configuration for one session attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    language: String,
    prompt: Option<String>,
    max_results: u32,
    show_partial_results: bool,
    present_ui: bool,
}

impl RecognitionConfig {
    pub fn builder() -> RecognitionConfigBuilder {
        RecognitionConfigBuilder::default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn show_partial_results(&self) -> bool {
        self.show_partial_results
    }

    pub fn present_ui(&self) -> bool {
        self.present_ui
    }
}

#[derive(Debug, Clone)]
pub struct RecognitionConfigBuilder {
    language: String,
    prompt: Option<String>,
    max_results: u32,
    show_partial_results: bool,
    present_ui: bool,
}

impl Default for RecognitionConfigBuilder {
    fn default() -> Self {
        Self {
            language: String::new(),
            prompt: None,
            max_results: DEFAULT_MAX_RESULTS,
            show_partial_results: false,
            present_ui: true,
        }
    }
}

impl RecognitionConfigBuilder {
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn show_partial_results(mut self, enabled: bool) -> Self {
        self.show_partial_results = enabled;
        self
    }

    pub fn present_ui(mut self, enabled: bool) -> Self {
        self.present_ui = enabled;
        self
    }

    pub fn build(self) -> Result<RecognitionConfig, ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::InvalidMaxResults);
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }

        Ok(RecognitionConfig {
            language: self.language,
            prompt: self.prompt,
            max_results: self.max_results,
            show_partial_results: self.show_partial_results,
            present_ui: self.present_ui,
        })
    }
}

/// Arguments of a `startListening` call as they arrive from the caller.
///
/// Every field is optional; see [`StartRequest::into_config`] for defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub show_partial_results: Option<bool>,
    #[serde(default)]
    pub present_ui: Option<bool>,
}

impl StartRequest {
    /// Resolve caller arguments into a config.
    ///
    /// An absent, empty or `"null"` language falls back to `default_language`;
    /// the same values for the prompt mean "no prompt".
    pub fn into_config<F>(self, default_language: F) -> Result<RecognitionConfig, ConfigError>
    where
        F: FnOnce() -> String,
    {
        let language = given(self.language).unwrap_or_else(default_language);

        RecognitionConfig::builder()
            .language(language)
            .prompt(given(self.prompt))
            .max_results(self.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
            .show_partial_results(self.show_partial_results.unwrap_or(false))
            .present_ui(self.present_ui.unwrap_or(true))
            .build()
    }
}

fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NULL_ARGUMENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageModel {
    /// Free-form dictation, as opposed to short web-search style queries.
    FreeForm,
}

/// The record handed to the engine when listening starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    pub language_model: LanguageModel,
    pub language: String,
    pub max_results: u32,
    pub calling_package: String,
    pub partial_results: bool,
    pub dictation_mode: bool,
    pub prompt: Option<String>,
}

impl EngineOptions {
    pub fn from_config(config: &RecognitionConfig, calling_package: &str) -> Self {
        Self {
            language_model: LanguageModel::FreeForm,
            language: config.language().to_string(),
            max_results: config.max_results(),
            calling_package: calling_package.to_string(),
            partial_results: config.show_partial_results(),
            dictation_mode: config.show_partial_results(),
            prompt: config.prompt().map(str::to_string),
        }
    }
}
