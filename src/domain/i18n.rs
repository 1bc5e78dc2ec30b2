// Localization catalog
use super::error::StationError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/i18n.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::ZhCn, Language::ZhTw, Language::EnUs];

    pub fn code(&self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::ZhTw => "zh-TW",
            Language::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| StationError::UnknownLanguage(s.to_string()))
    }
}

pub type Translations = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<Language, Translations>,
}

impl Catalog {
    /// Catalog compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_toml(EMBEDDED_CATALOG)
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, Translations> =
            toml::from_str(source).context("Failed to parse string catalog")?;

        let mut tables = HashMap::new();
        for (code, table) in raw {
            let language: Language = code.parse()?;
            tables.insert(language, table);
        }

        for language in Language::ALL {
            if !tables.contains_key(&language) {
                anyhow::bail!("String catalog has no table for {}", language);
            }
        }

        Ok(Self { tables })
    }

    /// Translation for `key`, or the key itself when the table lacks it.
    pub fn translate<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn table(&self, language: Language) -> Translations {
        self.tables.get(&language).cloned().unwrap_or_default()
    }
}
