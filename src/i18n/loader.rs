//! Translation loader and i18n management
//!
//! This module provides the core internationalization functionality including
//! translation loading, language fallback, and message formatting.
//! The `ja` and `en` catalogues are compiled in; a translations directory can
//! override them or add languages.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::utils::errors::{TodoBuddyError, Result};
use crate::config::I18nConfig;

const BUILTIN_TRANSLATIONS: &[(&str, &str)] = &[
    ("ja", include_str!("../../translations/ja.json")),
    ("en", include_str!("../../translations/en.json")),
];

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    /// Default language code
    default_language: String,
    /// Supported language codes
    supported_languages: Vec<String>,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create an I18n instance holding the built-in catalogues
    pub fn new(config: &I18nConfig) -> Self {
        let mut i18n = Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
        };

        for (lang_code, content) in BUILTIN_TRANSLATIONS {
            match serde_json::from_str::<Value>(content) {
                Ok(Value::Object(map)) => {
                    i18n.translations.insert(lang_code.to_string(), map);
                }
                _ => warn!("Built-in translations for {} are not a JSON object", lang_code),
            }
        }

        i18n
    }

    /// Load `<lang>.json` files for every supported language from a directory
    ///
    /// Files replace the built-in catalogue of their language. A missing file
    /// is only an error when no catalogue exists for the default language.
    pub async fn load_translations(&mut self, translations_dir: &Path) -> Result<()> {
        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));

            if fs::try_exists(&file_path).await? {
                self.load_language_file(&file_path, lang_code).await?;
                info!("Loaded translations for language: {}", lang_code);
            } else {
                debug!("Translation file not found: {}", file_path.display());
            }
        }

        if !self.translations.contains_key(&self.default_language) {
            return Err(TodoBuddyError::Config(format!(
                "No translations available for default language {}",
                self.default_language
            )));
        }

        Ok(())
    }

    /// Load a single language file
    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let translations: Value = serde_json::from_str(&content)?;

        if let Value::Object(map) = translations {
            debug!("Loaded {} translation keys for {}", map.len(), lang_code);
            self.translations.insert(lang_code.to_string(), map);
        } else {
            return Err(TodoBuddyError::Config(
                format!("Invalid translation file format for {}", lang_code)
            ));
        }

        Ok(())
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        let translation = self
            .get_translation_value(key, effective_lang)
            .or_else(|| self.get_translation_value(key, &self.default_language));

        match translation {
            Some(Value::String(text)) => self.format_message(text, params),
            Some(other) => self.format_message(&other.to_string(), params),
            None => {
                warn!("Translation key '{}' not found in any language", key);
                key.to_string()
            }
        }
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|supported| supported == lang)
    }

    /// Get the effective language (fallback to default if not supported)
    fn get_effective_language<'a>(&'a self, lang: &'a str) -> &'a str {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang
        } else {
            &self.default_language
        }
    }

    /// Get translation value from nested JSON structure
    fn get_translation_value(&self, key: &str, lang: &str) -> Option<&Value> {
        let translations = self.translations.get(lang)?;

        // Support nested keys like "todo.registered"
        let mut parts = key.split('.');
        let mut current = translations.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }

    /// Format message with parameters
    fn format_message(&self, template: &str, params: Option<&TranslationParams>) -> String {
        let mut result = template.to_string();
        if let Some(params) = params {
            for (key, value) in params {
                let placeholder = format!("{{{}}}", key);
                result = result.replace(&placeholder, value);
            }
        }
        result
    }
}
