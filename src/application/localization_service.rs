// Localization service - Active language and string lookup
use crate::application::preference_store::{LANGUAGE_KEY, PreferenceStore};
use crate::domain::i18n::{Catalog, Language, Translations};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct LocalizationService {
    catalog: Arc<Catalog>,
    language: Arc<RwLock<Language>>,
    store: Arc<dyn PreferenceStore>,
}

impl LocalizationService {
    /// Restore the saved language, defaulting to simplified Chinese.
    pub async fn load(catalog: Catalog, store: Arc<dyn PreferenceStore>) -> anyhow::Result<Self> {
        let language = match store.get(LANGUAGE_KEY).await? {
            Some(code) => code.parse::<Language>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring saved language: {}", e);
                Language::default()
            }),
            None => Language::default(),
        };

        Ok(Self {
            catalog: Arc::new(catalog),
            language: Arc::new(RwLock::new(language)),
            store,
        })
    }

    pub async fn language(&self) -> Language {
        *self.language.read().await
    }

    /// Translate `key` in the active language.
    pub async fn t(&self, key: &str) -> String {
        let language = self.language().await;
        self.catalog.translate(language, key).to_string()
    }

    /// Translate several keys under one language read.
    pub async fn translator(&self) -> Translator {
        Translator {
            catalog: self.catalog.clone(),
            language: self.language().await,
        }
    }

    /// Switch and persist the language. Returns `false` when unchanged.
    pub async fn set_language(&self, language: Language) -> anyhow::Result<bool> {
        let mut current = self.language.write().await;
        if *current == language {
            return Ok(false);
        }

        self.store.set(LANGUAGE_KEY, language.code()).await?;
        tracing::info!(from = %*current, to = %language, "Language changed");
        *current = language;
        Ok(true)
    }

    pub fn table(&self, language: Language) -> Translations {
        self.catalog.table(language)
    }
}

/// Snapshot of the catalog bound to one language.
pub struct Translator {
    catalog: Arc<Catalog>,
    language: Language,
}

impl Translator {
    pub fn t(&self, key: &str) -> String {
        self.catalog.translate(self.language, key).to_string()
    }
}
