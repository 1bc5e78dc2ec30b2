// Preference store trait for persisted key-value entries
use async_trait::async_trait;

/// Key holding the JSON-serialized settings blob.
pub const SETTINGS_KEY: &str = "rocketSettings";
/// Key holding the preferred language code.
pub const LANGUAGE_KEY: &str = "rocketLanguage";

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the raw value stored under `key`
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replace the raw value stored under `key`
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
