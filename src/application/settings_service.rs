// Settings service - Load, save and reset the persisted settings blob
use crate::application::preference_store::{PreferenceStore, SETTINGS_KEY};
use crate::domain::settings::Settings;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn PreferenceStore>,
    settings: Arc<RwLock<Settings>>,
}

impl SettingsService {
    /// Load persisted settings, falling back to defaults when absent or malformed.
    pub async fn load(store: Arc<dyn PreferenceStore>) -> anyhow::Result<Self> {
        let settings = match store.get(SETTINGS_KEY).await? {
            Some(raw) => match serde_json::from_str::<Settings>(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Could not parse saved settings, using defaults: {}", e);
                    Settings::default()
                }
            },
            None => Settings::default(),
        };

        Ok(Self {
            store,
            settings: Arc::new(RwLock::new(settings)),
        })
    }

    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Validate and persist `settings`, returning what was stored.
    pub async fn save(&self, settings: Settings) -> anyhow::Result<Settings> {
        let settings = settings.normalized()?;
        self.persist(&settings).await?;
        *self.settings.write().await = settings.clone();
        tracing::info!(device_id = %settings.connection.device_id, "Settings saved");
        Ok(settings)
    }

    pub async fn reset(&self) -> anyhow::Result<Settings> {
        let settings = Settings::default();
        self.persist(&settings).await?;
        *self.settings.write().await = settings.clone();
        tracing::info!("Settings reset to defaults");
        Ok(settings)
    }

    async fn persist(&self, settings: &Settings) -> anyhow::Result<()> {
        let raw = serde_json::to_string(settings).context("Failed to encode settings")?;
        self.store.set(SETTINGS_KEY, &raw).await
    }
}
